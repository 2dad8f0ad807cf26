/// Browser form served at `/`. Calls `/calculate` and renders the answer.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Digit-distinct sequence</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .container { max-width: 600px; margin: 0 auto; }
        .form-group { margin: 20px 0; }
        label { display: block; margin-bottom: 5px; }
        input { padding: 8px; width: 200px; }
        button { padding: 10px 20px; background: #007cba; color: white; border: none; cursor: pointer; }
        .result { margin-top: 20px; padding: 15px; background: #f5f5f5; border-radius: 5px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Digit-distinct sequence</h1>
        <p>Find the N-th positive integer whose decimal digits are all different.</p>

        <div class="form-group">
            <label for="n">Ordinal N:</label>
            <input type="number" id="n" min="1" value="10">
            <button onclick="calculate()">Find</button>
        </div>

        <div id="result" class="result" style="display:none;"></div>

        <script>
            function calculate() {
                const n = document.getElementById('n').value;
                const resultDiv = document.getElementById('result');

                fetch('/calculate?n=' + encodeURIComponent(n))
                    .then(response => response.json())
                    .then(data => {
                        if (data.error) {
                            resultDiv.innerHTML = '<strong>Error:</strong> ' + data.error;
                        } else {
                            resultDiv.innerHTML =
                                '<strong>N = ' + data.n + ':</strong> ' + data.result + '<br>' +
                                '<strong>Sequence:</strong> ' + data.sequence.join(', ');
                        }
                        resultDiv.style.display = 'block';
                    })
                    .catch(error => {
                        console.error('Error:', error);
                        resultDiv.innerHTML = '<strong>Request failed</strong>';
                        resultDiv.style.display = 'block';
                    });
            }

            window.onload = calculate;
        </script>
    </div>
</body>
</html>
"#;
