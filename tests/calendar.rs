#[cfg(test)]
mod tests {
    use lbi::api::{CalendarOracle, ReleaseOracle};
    use lbi::libs::error::LbiError;
    use mockito::Matcher;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    const EVENTS: &str = r#"{
        "kind": "calendar#events",
        "items": [
            {"summary": "Release Target review"},
            {"summary": "24-3 Release Target"},
            {"summary": "24-4 Release Target"}
        ]
    }"#;

    struct CalendarTestContext {
        server: mockito::ServerGuard,
        temp_dir: TempDir,
    }

    impl AsyncTestContext for CalendarTestContext {
        async fn setup() -> Self {
            CalendarTestContext {
                server: mockito::Server::new_async().await,
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl CalendarTestContext {
        fn token(&self, contents: &str) -> PathBuf {
            let path = self.temp_dir.path().join("token.json");
            fs::write(&path, contents).unwrap();
            path
        }

        fn oracle(&self, token: &Path) -> CalendarOracle {
            CalendarOracle::new("qa-calendar", token).with_api_url(&self.server.url())
        }
    }

    #[test_context(CalendarTestContext)]
    #[tokio::test]
    async fn test_first_release_target_wins(ctx: &mut CalendarTestContext) {
        let mock = ctx
            .server
            .mock("GET", "/calendars/qa-calendar/events")
            .match_header("authorization", "Bearer secret-token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Release Target".into()),
                Matcher::UrlEncoded("singleEvents".into(), "true".into()),
                Matcher::UrlEncoded("orderBy".into(), "startTime".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EVENTS)
            .expect(1)
            .create_async()
            .await;

        let token = ctx.token(r#"{"access_token": "secret-token"}"#);
        let release = ctx.oracle(&token).current_release().await.unwrap();

        assert_eq!(release.to_string(), "2024-3");
        mock.assert_async().await;
    }

    #[test_context(CalendarTestContext)]
    #[tokio::test]
    async fn test_no_release_in_window(ctx: &mut CalendarTestContext) {
        ctx.server
            .mock("GET", "/calendars/qa-calendar/events")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": [{"summary": "Planning"}]}"#)
            .create_async()
            .await;

        let token = ctx.token(r#"{"access_token": "secret-token"}"#);
        let result = ctx.oracle(&token).with_lookahead_weeks(4).current_release().await;

        assert!(matches!(result, Err(LbiError::NoReleaseFound { weeks: 4 })));
    }

    #[test_context(CalendarTestContext)]
    #[tokio::test]
    async fn test_missing_token_is_oracle_unavailable(ctx: &mut CalendarTestContext) {
        let mock = ctx
            .server
            .mock("GET", "/calendars/qa-calendar/events")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let token = ctx.temp_dir.path().join("absent.json");
        let result = ctx.oracle(&token).current_release().await;

        match result {
            Err(LbiError::OracleUnavailable { reason, remedy }) => {
                assert!(reason.contains("absent.json"));
                assert!(remedy.contains("access_token"));
            }
            other => panic!("expected OracleUnavailable, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[test_context(CalendarTestContext)]
    #[tokio::test]
    async fn test_malformed_token_is_oracle_unavailable(ctx: &mut CalendarTestContext) {
        let token = ctx.token("not json");
        let result = ctx.oracle(&token).current_release().await;
        assert!(matches!(result, Err(LbiError::OracleUnavailable { .. })));
    }

    #[test_context(CalendarTestContext)]
    #[tokio::test]
    async fn test_rejected_token_is_oracle_unavailable(ctx: &mut CalendarTestContext) {
        ctx.server
            .mock("GET", "/calendars/qa-calendar/events")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let token = ctx.token(r#"{"access_token": "expired"}"#);
        let result = ctx.oracle(&token).current_release().await;

        assert!(matches!(result, Err(LbiError::OracleUnavailable { .. })));
    }
}
