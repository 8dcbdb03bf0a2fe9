//! Requests addressing a single entry by key: query, purge, get, stat.

use crate::types::RequestType;

short_field_request! {
    /// Reads the quota and TTL of a counter entry.
    QueryRequest, RequestType::Query, "query", key, key_str, encode_query, decode_query
}

short_field_request! {
    /// Removes an entry.
    PurgeRequest, RequestType::Purge, "purge", key, key_str, encode_purge, decode_purge
}

short_field_request! {
    /// Reads the value of a raw entry.
    GetRequest, RequestType::Get, "get", key, key_str, encode_get, decode_get
}

short_field_request! {
    /// Reads the read/write counters of an entry.
    StatRequest, RequestType::Stat, "stat", key, key_str, encode_stat, decode_stat
}

impl_request_key!(QueryRequest, PurgeRequest, GetRequest, StatRequest);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_query_roundtrip() {
        let buf = encode_query("0fa80d9d-d371-4f16-9c50-1bfa13f199b5").unwrap();
        let request = decode_query(&buf).unwrap();
        assert_eq!(
            request.key_str(),
            Some("0fa80d9d-d371-4f16-9c50-1bfa13f199b5")
        );
    }

    #[test]
    fn test_query_empty_key() {
        let buf = encode_query("").unwrap();
        assert_eq!(buf.len(), QueryRequest::HEADER_SIZE);
        assert_eq!(&buf[..], &[RequestType::Query.as_u8(), 0]);
        let request = decode_query(&buf).unwrap();
        assert!(request.key.is_empty());
    }

    #[test]
    fn test_get_roundtrip() {
        let buf = encode_get("65dbdbde-4f2b-4e0d-9d31-9697e2a114c4").unwrap();
        let request = decode_get(&buf).unwrap();
        assert_eq!(request.key, b"65dbdbde-4f2b-4e0d-9d31-9697e2a114c4");
        assert_eq!(request.to_buffer().unwrap(), buf);
    }

    #[test]
    fn test_purge_roundtrip() {
        let buf = encode_purge("v5").unwrap();
        let request = decode_purge(&buf).unwrap();
        assert_eq!(request.key, b"v5");
        assert_eq!(request.encoded_len(), 4);
    }

    #[test]
    fn test_stat_roundtrip() {
        let buf = encode_stat("v6").unwrap();
        let request = decode_stat(&buf).unwrap();
        assert_eq!(request.request_key().as_str(), Some("v6"));
    }

    #[test]
    fn test_max_length_key() {
        let key = [b'x'; 255];
        let buf = encode_purge(key).unwrap();
        assert_eq!(buf.len(), 2 + 255);
        assert_eq!(decode_purge(&buf).unwrap().key, &key[..]);

        assert_eq!(
            encode_get([b'x'; 256]),
            Err(ProtocolError::FieldTooLarge {
                field: "key",
                size: 256,
                max: 255
            })
        );
    }

    #[test]
    fn test_declared_key_longer_than_buffer() {
        let buf = [RequestType::Get.as_u8(), 3, b'a', b'b'];
        assert_eq!(
            decode_get(&buf),
            Err(ProtocolError::TooShort {
                needed: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_non_utf8_key() {
        let buf = encode_query([0xFFu8, 0xFE]).unwrap();
        let request = decode_query(&buf).unwrap();
        assert_eq!(request.key, &[0xFFu8, 0xFE]);
        assert_eq!(request.key_str(), None);
    }

    #[test]
    fn test_views_compare_structurally() {
        let a = encode_query("same").unwrap();
        let b = encode_query("same").unwrap();
        assert_eq!(decode_query(&a).unwrap(), decode_query(&b).unwrap());
    }
}
