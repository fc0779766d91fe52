use crate::models::{DocResult, HeaderMode, RawResponse, Reply};

/// Classify a response: any 2xx is success, everything else is an error.
///
/// Headers are copied verbatim into the reply in both branches when `mode`
/// asks for them.
pub fn classify(response: RawResponse, mode: HeaderMode) -> DocResult {
    let success = (200..300).contains(&response.status);
    let reply = Reply {
        status: response.status,
        body: response.body,
        headers: match mode {
            HeaderMode::Include => Some(response.headers),
            HeaderMode::Exclude => None,
        },
    };

    if success {
        DocResult::Ok(reply)
    } else {
        DocResult::Error(reply)
    }
}

/// Classify a DELETE response: only 200 and 202 count as success
pub fn classify_delete(response: RawResponse) -> DocResult {
    let reply = Reply {
        status: response.status,
        body: response.body,
        headers: None,
    };

    match reply.status {
        200 | 202 => DocResult::Ok(reply),
        _ => DocResult::Error(reply),
    }
}

/// An attachment exists iff fetching it classified as success
pub fn attachment_exists(result: &DocResult) -> bool {
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> RawResponse {
        RawResponse {
            status,
            body: format!("{{\"status\":{}}}", status),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("ETag".to_string(), "\"1-abc\"".to_string()),
            ],
        }
    }

    #[test]
    fn test_success_range_with_headers() {
        for status in [200, 201, 202, 299] {
            let result = classify(response(status), HeaderMode::Include);
            assert!(result.is_ok(), "{} should be success", status);
            assert_eq!(result.headers(), Some(&response(status).headers));
            assert_eq!(result.body(), response(status).body);
        }
    }

    #[test]
    fn test_error_keeps_headers_verbatim() {
        let result = classify(response(404), HeaderMode::Include);
        assert!(result.is_error());
        assert_eq!(result.headers(), Some(&response(404).headers));
        assert_eq!(result.status(), 404);
    }

    #[test]
    fn test_exclude_mode_drops_headers() {
        assert_eq!(classify(response(200), HeaderMode::Exclude).headers(), None);
        assert_eq!(classify(response(500), HeaderMode::Exclude).headers(), None);
    }

    #[test]
    fn test_non_2xx_are_errors() {
        for status in [199, 300, 304, 401, 409, 500, 503] {
            assert!(classify(response(status), HeaderMode::Exclude).is_error());
        }
    }

    #[test]
    fn test_delete_accepts_only_200_and_202() {
        assert!(classify_delete(response(200)).is_ok());
        assert!(classify_delete(response(202)).is_ok());

        for status in [201, 204, 404, 409, 500] {
            let result = classify_delete(response(status));
            assert!(result.is_error(), "{} should be error", status);
            assert_eq!(result.headers(), None);
        }
    }

    #[test]
    fn test_attachment_exists() {
        assert!(attachment_exists(&classify(response(200), HeaderMode::Exclude)));
        assert!(!attachment_exists(&classify(response(404), HeaderMode::Exclude)));
    }
}
