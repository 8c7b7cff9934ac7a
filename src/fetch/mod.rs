mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// Loads a dataset from an `http(s)` URL or a local path.
///
/// Sources whose name ends in `.gz` are gunzipped.
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(client, source)
            .await
            .with_context(|| format!("failed to fetch {source}"))?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read {source}"))?
    };
    debug!(source, bytes = bytes.len(), "Source loaded");

    if source.ends_with(".gz") {
        gunzip(&bytes).with_context(|| format!("failed to gunzip {source}"))
    } else {
        Ok(bytes)
    }
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use std::time::Duration;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", std::env::temp_dir().display(), name)
    }

    #[tokio::test]
    async fn test_load_plain_file() {
        let path = temp_path("bike_traffic_test_plain.csv");
        std::fs::write(&path, b"a,b\n1,2\n").unwrap();

        let client = BasicClient::new(Duration::from_secs(5)).unwrap();
        let bytes = load_source(&client, &path).await.unwrap();
        assert_eq!(bytes, b"a,b\n1,2\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_gzipped_file_matches_plain() {
        let path = temp_path("bike_traffic_test_gz.csv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"a,b\n1,2\n").unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let client = BasicClient::new(Duration::from_secs(5)).unwrap();
        let bytes = load_source(&client, &path).await.unwrap();
        assert_eq!(bytes, b"a,b\n1,2\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let client = BasicClient::new(Duration::from_secs(5)).unwrap();
        let result = load_source(&client, &temp_path("bike_traffic_does_not_exist.csv")).await;
        assert!(result.is_err());
    }
}
