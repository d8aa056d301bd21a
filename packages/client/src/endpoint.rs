//! サーバーの URL 組み立て
//!
//! ユーザー ID やグループ ID は任意の文字列なので、文字列連結ではなく
//! `Url` に渡してパーセントエンコードさせる。

use reqwest::Url;

use crate::error::ClientError;

/// WebSocket の接続先に `user_id` クエリを付ける
///
/// `ws_url` は `ws://127.0.0.1:8080/ws` の形式。
pub fn websocket_url(ws_url: &str, user_id: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(ws_url)
        .map_err(|e| ClientError::ConnectionError(format!("invalid url '{}': {}", ws_url, e)))?;
    url.query_pairs_mut().append_pair("user_id", user_id);
    Ok(url)
}

/// REST API のベース URL をパース
pub fn parse_api_base(api_url: &str) -> Result<Url, ClientError> {
    let url = Url::parse(api_url)
        .map_err(|e| ClientError::Api(format!("invalid url '{}': {}", api_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Api(format!(
            "'{}' cannot be used as an API base url",
            api_url
        )));
    }
    Ok(url)
}

/// ベース URL の後ろにパスセグメントを 1 つずつエンコードして足す
pub fn api_endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::Api(format!("'{}' cannot be used as an API base url", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_websocket_url_encodes_reserved_characters() {
        // テスト項目: user_id の予約文字（+ & = 空白）がエンコードされる
        // given (前提条件):
        let ws_url = "ws://127.0.0.1:8080/ws";

        // when (操作):
        let url = websocket_url(ws_url, "ann+lee &co=1").unwrap();

        // then (期待する結果):
        assert_eq!(
            url.as_str(),
            "ws://127.0.0.1:8080/ws?user_id=ann%2Blee+%26co%3D1"
        );
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "user_id");
        assert_eq!(value, "ann+lee &co=1");
    }

    #[test]
    fn test_websocket_url_rejects_invalid_base() {
        // テスト項目: 不正な接続先はエラーになる
        // given (前提条件):
        let ws_url = "not a url";

        // when (操作):
        let result = websocket_url(ws_url, "u1");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::ConnectionError(_))));
    }

    #[test]
    fn test_api_endpoint_encodes_each_segment() {
        // テスト項目: パスセグメント内の / ? # 空白がエンコードされ、階層が増えない
        // given (前提条件):
        let base = parse_api_base("http://127.0.0.1:8080/api").unwrap();

        // when (操作):
        let url = api_endpoint(&base, &["messages", "a/b c?d#e"]).unwrap();

        // then (期待する結果):
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/api/messages/a%2Fb%20c%3Fd%23e"
        );
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_api_endpoint_with_trailing_slash_base() {
        // テスト項目: 末尾にスラッシュのあるベース URL でも空のセグメントが入らない
        // given (前提条件):
        let base = parse_api_base("http://127.0.0.1:8080/api/").unwrap();

        // when (操作):
        let url = api_endpoint(&base, &["groups", "g1", "messages"]).unwrap();

        // then (期待する結果):
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/groups/g1/messages");
    }

    #[test]
    fn test_parse_api_base_rejects_non_hierarchical_url() {
        // テスト項目: パスを持てない URL はベース URL にできない
        // given (前提条件):
        let api_url = "mailto:someone@example.com";

        // when (操作):
        let result = parse_api_base(api_url);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::Api(_))));
    }
}
