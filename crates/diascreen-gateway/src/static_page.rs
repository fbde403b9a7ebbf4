//! The screening form page served at `/`

use axum::response::Html;

/// Serve the inline screening form.
///
/// The page posts the eight intake fields form-encoded to `/predict`
/// and renders the verdict label, red for a positive screen and green
/// for a negative one.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>DiaScreen</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            background-color: #f4f4f9;
            margin: 0;
            padding: 0;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        .container {
            background: #ffffff;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 4px 8px rgba(0, 0, 0, 0.2);
            text-align: center;
            width: 100%;
            max-width: 400px;
        }
        h1 {
            color: #333;
            font-size: 1.5em;
            margin-bottom: 20px;
        }
        form {
            display: flex;
            flex-direction: column;
        }
        input {
            margin-bottom: 15px;
            padding: 10px;
            border: 1px solid #ccc;
            border-radius: 4px;
            font-size: 1em;
        }
        button {
            background-color: #4CAF50;
            color: white;
            padding: 10px;
            border: none;
            border-radius: 4px;
            cursor: pointer;
            font-size: 1em;
        }
        button:hover {
            background-color: #45a049;
        }
        #result {
            margin-top: 20px;
            font-size: 1.2em;
            color: #333;
        }
        #result.positive {
            color: red;
        }
        #result.negative {
            color: green;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>DiaScreen &mdash; Diabetes Prediction</h1>
        <form id="prediction-form">
            <input type="number" name="Pregnancies" placeholder="Jumlah Kehamilan (Pregnancies)" required>
            <input type="number" name="Glucose" placeholder="Glukosa (Glucose)" required>
            <input type="number" name="BloodPressure" placeholder="Tekanan Darah (Blood Pressure)" required>
            <input type="number" name="SkinThickness" placeholder="Ketebalan Kulit (Skin Thickness)" required>
            <input type="number" name="Insulin" placeholder="Insulin" required>
            <input type="number" name="BMI" placeholder="Indeks Massa Tubuh (BMI)" step="any" required>
            <input type="number" name="DiabetesPedigreeFunction" placeholder="Diabetes Pedigree Function" step="any" required>
            <input type="number" name="Age" placeholder="Usia (Age)" required>
            <button type="submit">Prediksi</button>
        </form>
        <div id="result"></div>
    </div>
    <script>
        document.getElementById('prediction-form').onsubmit = async (e) => {
            e.preventDefault();
            const body = new URLSearchParams(new FormData(e.target));
            const response = await fetch('/predict', {
                method: 'POST',
                headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
                body
            });
            const result = await response.json();
            const resultDiv = document.getElementById('result');

            if (result.error) {
                resultDiv.innerHTML = `<h2>Error: ${result.error}</h2>`;
                resultDiv.className = "";
            } else {
                resultDiv.innerHTML = `<h2>${result.prediction}</h2>`;
                if (result.prediction.includes("Positif")) {
                    resultDiv.className = "positive";
                } else {
                    resultDiv.className = "negative";
                }
            }
        };
    </script>
</body>
</html>
"#;
