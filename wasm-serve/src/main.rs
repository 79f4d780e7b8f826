//! Development server for the digit guesser page
//!
//! Serves the `www` directory (front-end bundle in `pkg/`, engine in
//! `engine/`) with the MIME types and cross-origin headers WASM needs.

use clap::Parser;
use log::{error, info, warn};
use mime_guess::MimeGuess;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tiny_http::{Header, Request, Response, Server, StatusCode};

type FileResponse = Response<io::Cursor<Vec<u8>>>;

#[derive(Parser, Debug)]
#[command(name = "wasm-serve")]
#[command(about = "Serve the digit guesser page for local development")]
struct Args {
    /// Directory to serve files from
    #[arg(default_value = "digit-guesser/www")]
    directory: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[derive(Debug, Error)]
enum ServeError {
    #[error("directory {path:?} not found: {source}")]
    Root { path: PathBuf, source: io::Error },
    #[error("cannot listen on {addr}: {message}")]
    Bind { addr: String, message: String },
}

/// What a request path maps to inside the served directory
#[derive(Debug, PartialEq)]
enum Resolved {
    File(PathBuf),
    NotFound,
    Forbidden,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ServeError> {
    let root_dir = args
        .directory
        .canonicalize()
        .map_err(|source| ServeError::Root {
            path: args.directory.clone(),
            source,
        })?;

    let addr = format!("{}:{}", args.host, args.port);
    let server = Server::http(&addr).map_err(|e| ServeError::Bind {
        addr: addr.clone(),
        message: e.to_string(),
    })?;

    info!("serving {:?} at http://{}", root_dir, addr);
    for request in server.incoming_requests() {
        handle(&root_dir, request);
    }
    Ok(())
}

fn handle(root_dir: &Path, request: Request) {
    let url = request.url().to_string();
    let url_path = url.split('?').next().unwrap_or(&url);

    let (status, response) = match resolve(root_dir, url_path) {
        Resolved::File(path) => match serve_file(&path) {
            Ok(response) => (200, response),
            Err(e) => {
                warn!("{:?}: {}", path, e);
                (404, not_found())
            }
        },
        Resolved::NotFound => (404, not_found()),
        Resolved::Forbidden => (403, forbidden()),
    };

    info!("{} {} -> {}", request.method(), url_path, status);
    if let Err(e) = request.respond(response) {
        warn!("failed to respond to {}: {}", url_path, e);
    }
}

/// Map a URL path to a file under `root_dir`, refusing anything that escapes it
fn resolve(root_dir: &Path, url_path: &str) -> Resolved {
    let decoded = urlencoded_decode(url_path);
    let relative = decoded.trim_start_matches('/');
    let candidate = if relative.is_empty() {
        root_dir.join("index.html")
    } else {
        root_dir.join(relative)
    };

    let Ok(canonical) = candidate.canonicalize() else {
        return Resolved::NotFound;
    };
    if !canonical.starts_with(root_dir) {
        return Resolved::Forbidden;
    }

    if canonical.is_dir() {
        Resolved::File(canonical.join("index.html"))
    } else {
        Resolved::File(canonical)
    }
}

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn serve_file(path: &Path) -> io::Result<FileResponse> {
    let contents = fs::read(path)?;

    let headers = [
        header("Content-Type", get_mime_type(path)),
        header("Access-Control-Allow-Origin", "*"),
        // SharedArrayBuffer needs cross-origin isolation
        header("Cross-Origin-Opener-Policy", "same-origin"),
        header("Cross-Origin-Embedder-Policy", "require-corp"),
    ];

    Ok(headers
        .into_iter()
        .flatten()
        .fold(Response::from_data(contents), |response, h| response.with_header(h)))
}

fn get_mime_type(path: &Path) -> &'static str {
    // mime_guess may not know wasm
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("wasm") => "application/wasm",
        Some("js") | Some("mjs") => "application/javascript",
        Some("txt") => "text/plain; charset=utf-8",
        _ => MimeGuess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream"),
    }
}

fn not_found() -> FileResponse {
    Response::from_string("404 Not Found").with_status_code(StatusCode(404))
}

fn forbidden() -> FileResponse {
    Response::from_string("403 Forbidden").with_status_code(StatusCode(403))
}

/// Percent-decode a URL path. Malformed escapes are kept literally.
fn urlencoded_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).and_then(|h| std::str::from_utf8(h).ok());
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn site() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap().join("www");
        fs::create_dir_all(root.join("pkg")).unwrap();
        File::create(root.join("index.html"))
            .unwrap()
            .write_all(b"<html>guesser</html>")
            .unwrap();
        File::create(root.join("pkg").join("digit_guesser_bg.wasm"))
            .unwrap()
            .write_all(b"\0asm")
            .unwrap();
        File::create(root.join("pkg").join("index.html")).unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_get_mime_type_wasm() {
        assert_eq!(get_mime_type(Path::new("digit_guesser_bg.wasm")), "application/wasm");
    }

    #[test]
    fn test_get_mime_type_js() {
        assert_eq!(get_mime_type(Path::new("digit_guesser.js")), "application/javascript");
        assert_eq!(get_mime_type(Path::new("engine.mjs")), "application/javascript");
    }

    #[test]
    fn test_get_mime_type_html() {
        assert_eq!(get_mime_type(Path::new("index.html")), "text/html");
    }

    #[test]
    fn test_get_mime_type_network_download() {
        assert_eq!(
            get_mime_type(Path::new("your-neural-network.txt")),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_urlencoded_decode() {
        assert_eq!(urlencoded_decode("hello%20world"), "hello world");
        assert_eq!(urlencoded_decode("foo+bar"), "foo bar");
        assert_eq!(urlencoded_decode("test%2Fpath"), "test/path");
        assert_eq!(urlencoded_decode("normal"), "normal");
    }

    #[test]
    fn test_urlencoded_decode_multibyte_and_malformed() {
        assert_eq!(urlencoded_decode("caf%C3%A9"), "café");
        assert_eq!(urlencoded_decode("100%"), "100%");
        assert_eq!(urlencoded_decode("%zz"), "%zz");
    }

    #[test]
    fn test_resolve_root_is_index() {
        let (_guard, root) = site();
        assert_eq!(resolve(&root, "/"), Resolved::File(root.join("index.html")));
    }

    #[test]
    fn test_resolve_directory_is_its_index() {
        let (_guard, root) = site();
        assert_eq!(
            resolve(&root, "/pkg/"),
            Resolved::File(root.join("pkg").join("index.html"))
        );
    }

    #[test]
    fn test_resolve_missing_file() {
        let (_guard, root) = site();
        assert_eq!(resolve(&root, "/pkg/missing.js"), Resolved::NotFound);
    }

    #[test]
    fn test_resolve_refuses_traversal() {
        let (_guard, root) = site();
        let outside = root.parent().unwrap().join("outside.txt");
        File::create(&outside).unwrap();

        assert_eq!(resolve(&root, "/../outside.txt"), Resolved::Forbidden);
        assert_eq!(resolve(&root, "/%2E%2E/outside.txt"), Resolved::Forbidden);
    }

    #[test]
    fn test_serve_file() {
        let (_guard, root) = site();
        let response = serve_file(&root.join("pkg").join("digit_guesser_bg.wasm")).unwrap();
        assert_eq!(response.status_code().0, 200);
    }

    #[test]
    fn test_serve_file_not_found() {
        assert!(serve_file(Path::new("/nonexistent/file.txt")).is_err());
    }
}
