//! Download the move and capture sounds played by the browser client.

use std::fs;
use std::io::copy;
use std::path::Path;

const BASE_URL: &str = "https://raw.githubusercontent.com/lichess-org/lila/master/public/sound/standard/";
const FILES: [&str; 2] = ["Move.mp3", "Capture.mp3"];
const TARGET_DIR: &str = "static/sounds";

fn main() -> anyhow::Result<()> {
    fs::create_dir_all(TARGET_DIR)?;

    // A failed file is reported and skipped; the client plays silently without it.
    for file in FILES {
        let url = format!("{BASE_URL}{file}");
        let path = Path::new(TARGET_DIR).join(file);
        println!("Downloading {url} to {}...", path.display());
        match download(&url, &path) {
            Ok(()) => println!("Success."),
            Err(err) => println!("Failed: {err}"),
        }
    }

    Ok(())
}

fn download(url: &str, path: &Path) -> anyhow::Result<()> {
    let mut response = reqwest::blocking::get(url)?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to download: {}", response.status());
    }

    let mut dest = fs::File::create(path)?;
    copy(&mut response, &mut dest)?;
    Ok(())
}
