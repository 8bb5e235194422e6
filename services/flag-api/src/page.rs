//! The generator page served at `/`.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Indian Flag Generator</title>
  <meta name="description" content="A Happy Independence Day greeting with your name on the flag.">
  <style>
    body { background: #121212; color: #e0e0e0; font-family: sans-serif; margin: 0; padding: 10px;
           display: flex; flex-direction: column; align-items: center; }
    h1 { color: #ffb300; margin: 15px 0; text-align: center; }
    .panel { max-width: 500px; width: 100%; background: #1e1e1e; padding: 20px; border-radius: 8px;
             box-sizing: border-box; box-shadow: 0 4px 15px rgba(0, 0, 0, 0.4); }
    input, button { width: 100%; padding: 12px; font-size: 16px; border: none; border-radius: 6px;
                    box-sizing: border-box; }
    input { margin-bottom: 15px; background: #2c2c2c; color: #e0e0e0; outline: none; }
    button { background: #ff5722; color: #fff; font-weight: bold; cursor: pointer; }
    button:hover { background: #e64a19; }
    #download { display: none; margin-top: 10px; background: #4caf50; }
    #download:hover { background: #43a047; }
    #log { background: #000; color: #00ff41; font-family: monospace; font-size: 14px; padding: 10px;
           height: 200px; overflow-y: auto; margin-top: 15px; border-radius: 6px; }
    #preview { display: none; margin-top: 15px; max-width: 100%; border-radius: 8px; }
    @media (max-width: 480px) {
      .panel { padding: 15px; }
      input, button { font-size: 14px; padding: 10px; }
      #log { font-size: 12px; height: 150px; }
    }
  </style>
</head>
<body>
  <h1>Indian Flag Generator</h1>
  <div class="panel">
    <input type="text" id="name" placeholder="Enter Your Name" maxlength="30" required aria-label="Your Name">
    <button id="generate">Generate Flag</button>
    <button id="download">Download Flag</button>
    <div id="log"></div>
    <img id="preview" alt="Generated Flag">
  </div>
  <script>
    const log = (line) => {
      const el = document.getElementById("log");
      const row = document.createElement("div");
      row.textContent = line;
      el.appendChild(row);
      el.scrollTop = el.scrollHeight;
    };

    async function generate() {
      const preview = document.getElementById("preview");
      const download = document.getElementById("download");
      preview.style.display = "none";
      download.style.display = "none";
      document.getElementById("log").innerHTML = "";

      const name = document.getElementById("name").value.trim();
      if (!name) {
        log("x Please enter a name.");
        return;
      }

      log("> Starting flag generation...");
      log("> Validating name...");
      try {
        const response = await fetch(`/generate?name=${encodeURIComponent(name)}`);
        if (!response.ok) {
          const body = await response.json().catch(() => ({}));
          throw new Error(body.error || "Server error");
        }
        log("> Drawing flag...");
        const url = URL.createObjectURL(await response.blob());
        preview.src = url;
        preview.style.display = "block";
        download.style.display = "block";
        log("> Flag generated successfully!");
      } catch (err) {
        log("x " + err.message);
      }
    }

    document.getElementById("generate").addEventListener("click", generate);
    document.getElementById("download").addEventListener("click", () => {
      const link = document.createElement("a");
      link.href = document.getElementById("preview").src;
      link.download = "indian_flag.png";
      link.click();
    });
  </script>
</body>
</html>
"#;
