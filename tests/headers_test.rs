use samesite_cookie::http::{HeaderRecord, ResponseHeaders};

#[test]
fn test_response_headers_insertion_order() {
    let mut headers = ResponseHeaders::new();

    headers.append_raw("Content-Type", "text/html").unwrap();
    headers.append_raw("Set-Cookie", "a=1").unwrap();
    headers.append_raw("Cache-Control", "no-store").unwrap();
    headers.append_raw("Set-Cookie", "b=2").unwrap();

    let names: Vec<_> = headers.iter().map(|r| r.name.as_str().to_string()).collect();
    assert_eq!(
        names,
        vec!["content-type", "set-cookie", "cache-control", "set-cookie"]
    );
}

#[test]
fn test_clear_and_replay_restores_order() {
    let mut headers = ResponseHeaders::new();
    headers.append_raw("A", "1").unwrap();
    headers.append_raw("B", "2").unwrap();
    headers.append_raw("C", "3").unwrap();

    let snapshot = headers.records();
    headers.clear();
    for record in snapshot {
        if record.name == "b" {
            headers.append(HeaderRecord::parse("B", "22").unwrap());
        } else {
            headers.append(record);
        }
    }

    assert_eq!(headers.lines(), vec!["A: 1", "B: 22", "C: 3"]);
}

#[test]
fn test_header_map_conversion_keeps_duplicates() {
    let mut headers = ResponseHeaders::new();
    headers.append_raw("Set-Cookie", "a=1").unwrap();
    headers.append_raw("Set-Cookie", "b=2").unwrap();

    let map = headers.to_header_map();
    let values: Vec<_> = map.get_all("set-cookie").iter().collect();
    assert_eq!(values, vec!["a=1", "b=2"]);
}
