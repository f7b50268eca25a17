use serde::{Deserialize, Serialize};

use crate::app::domain::Place;
use crate::app::infrastructure::error::StoreError;

/// The remote place service.
///
/// Implementations block; callers run them off the UI thread.
pub trait PlaceStore: Send + Sync {
    /// The catalog of places a user can pick from.
    fn fetch_available_places(&self) -> Result<Vec<Place>, StoreError>;

    /// The user's saved places, most recently added first.
    fn fetch_user_places(&self) -> Result<Vec<Place>, StoreError>;

    /// Replace the user's saved places with `places`.
    fn update_user_places(&self, places: &[Place]) -> Result<(), StoreError>;
}

#[derive(Serialize, Deserialize)]
struct PlacesEnvelope {
    places: Vec<Place>,
}

#[derive(Serialize)]
struct PlacesBody<'a> {
    places: &'a [Place],
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// `PlaceStore` backed by the place service's JSON HTTP API.
pub struct HttpPlaceStore {
    base_url: String,
    timeout_secs: u64,
}

impl HttpPlaceStore {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_places(&self, path: &str) -> Result<Vec<Place>, StoreError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = minreq::get(&url).with_timeout(self.timeout_secs).send()?;
        let response = check_status(response)?;
        let envelope: PlacesEnvelope = response.json()?;
        Ok(envelope.places)
    }
}

impl PlaceStore for HttpPlaceStore {
    fn fetch_available_places(&self) -> Result<Vec<Place>, StoreError> {
        self.get_places("places")
    }

    fn fetch_user_places(&self) -> Result<Vec<Place>, StoreError> {
        self.get_places("user-places")
    }

    fn update_user_places(&self, places: &[Place]) -> Result<(), StoreError> {
        let url = self.url("user-places");
        tracing::debug!("PUT {} ({} places)", url, places.len());

        let response = minreq::put(&url)
            .with_timeout(self.timeout_secs)
            .with_json(&PlacesBody { places })?
            .send()?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: minreq::Response) -> Result<minreq::Response, StoreError> {
    if (200..300).contains(&response.status_code) {
        return Ok(response);
    }

    let body: Result<MessageBody, minreq::Error> = response.json();
    let message = body
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    Err(StoreError::Status {
        status: response.status_code,
        message,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::domain::place::test_place;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Mutex;
    use std::thread::JoinHandle;

    /// In-memory store; `fail_updates` makes every update fail with `Status`.
    pub(crate) struct FakeStore {
        pub catalog: Result<Vec<Place>, StoreError>,
        pub user_places: Result<Vec<Place>, StoreError>,
        pub fail_updates: bool,
        pub updates: Mutex<Vec<Vec<Place>>>,
    }

    impl FakeStore {
        pub(crate) fn new(catalog: Vec<Place>, user_places: Vec<Place>) -> Self {
            Self {
                catalog: Ok(catalog),
                user_places: Ok(user_places),
                fail_updates: false,
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    impl PlaceStore for FakeStore {
        fn fetch_available_places(&self) -> Result<Vec<Place>, StoreError> {
            self.catalog.clone()
        }

        fn fetch_user_places(&self) -> Result<Vec<Place>, StoreError> {
            self.user_places.clone()
        }

        fn update_user_places(&self, places: &[Place]) -> Result<(), StoreError> {
            self.updates.lock().unwrap().push(places.to_vec());
            if self.fail_updates {
                Err(StoreError::Status { status: 500, message: None })
            } else {
                Ok(())
            }
        }
    }

    /// Serve exactly one canned HTTP response and hand back the raw request.
    fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    #[test]
    fn test_fetch_available_places() {
        let body = serde_json::to_string(&PlacesEnvelope {
            places: vec![test_place("p1", 1.0, 2.0), test_place("p2", 3.0, 4.0)],
        })
        .unwrap();
        let (base, server) = serve_once("200 OK", &body);

        let store = HttpPlaceStore::new(&format!("{}/", base), 5);
        let places = store.fetch_available_places().unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].id.as_str(), "p2");

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /places "));
    }

    #[test]
    fn test_update_user_places_sends_full_list() {
        let (base, server) = serve_once("200 OK", r#"{"message":"User places updated!"}"#);

        let store = HttpPlaceStore::new(&base, 5);
        let places = vec![test_place("p2", 0.0, 0.0), test_place("p1", 0.0, 0.0)];
        store.update_user_places(&places).unwrap();

        let request = server.join().unwrap();
        assert!(request.starts_with("PUT /user-places "));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: PlacesEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(sent.places, places);
    }

    #[test]
    fn test_error_status_carries_service_message() {
        let (base, server) = serve_once("422 Unprocessable Entity", r#"{"message":"Places must be an array"}"#);

        let store = HttpPlaceStore::new(&base, 5);
        let err = store.update_user_places(&[]).unwrap_err();
        assert_eq!(
            err,
            StoreError::Status { status: 422, message: Some("Places must be an array".into()) }
        );
        server.join().unwrap();
    }

    #[test]
    fn test_error_status_without_body() {
        let (base, server) = serve_once("500 Internal Server Error", "");

        let store = HttpPlaceStore::new(&base, 5);
        let err = store.fetch_user_places().unwrap_err();
        assert_eq!(err, StoreError::Status { status: 500, message: None });
        assert_eq!(err.user_message(), None);
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody is listening on.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let store = HttpPlaceStore::new(&format!("http://127.0.0.1:{}", port), 2);
        let err = store.fetch_available_places().unwrap_err();
        assert!(err.is_transport(), "got {:?}", err);
    }

    #[test]
    fn test_base_url_normalized() {
        let store = HttpPlaceStore::new(" http://localhost:3000/ ", 5);
        assert_eq!(store.base_url(), "http://localhost:3000");
        assert_eq!(store.url("/user-places"), "http://localhost:3000/user-places");
    }
}
