//! Integration tests for version resolution

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use proptest::prelude::*;
    use relget_errors::{Error, VersionError};
    use relget_net::{NetClient, NetConfig};
    use relget_resolver::{select_highest, VersionResolver};
    use relget_types::{Version, VersionSelector};
    use std::sync::Arc;

    fn resolver(server: &MockServer, selector: &str) -> VersionResolver {
        VersionResolver::new(
            NetClient::new(NetConfig::for_tool("relget", "0.0.0")).unwrap(),
            server.url("/dist/index.json"),
            VersionSelector::parse(selector).unwrap(),
            None,
        )
    }

    fn serve_index<'a>(server: &'a MockServer, body: &str) -> httpmock::Mock<'a> {
        let body = body.to_string();
        server.mock(move |when, then| {
            when.method(GET).path("/dist/index.json");
            then.status(200)
                .header("content-type", "application/json")
                .body(body);
        })
    }

    #[tokio::test]
    async fn test_resolves_highest_satisfying() {
        let server = MockServer::start();
        serve_index(
            &server,
            r#"[{"version":"v1.2.0"},{"version":"v1.3.0"},{"version":"v1.2.5"}]"#,
        );

        let resolver = resolver(&server, "^1.2.0");
        assert_eq!(resolver.resolve().await.unwrap(), Version::new(1, 3, 0));
    }

    #[tokio::test]
    async fn test_no_satisfying_version() {
        let server = MockServer::start();
        serve_index(&server, r#"[{"version":"v1.2.0"}]"#);

        let resolver = resolver(&server, "^99.0.0");
        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Version(VersionError::NoSatisfyingVersion { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_resolution_fetches_index_once() {
        let server = MockServer::start();
        let mock = serve_index(
            &server,
            r#"[{"version":"v20.14.0"},{"version":"v22.3.0"}]"#,
        );

        let resolver = Arc::new(resolver(&server, "*"));
        let calls = (0..10).map(|_| {
            let resolver = Arc::clone(&resolver);
            async move { resolver.resolve().await }
        });
        let results = futures::future::join_all(calls).await;

        for result in results {
            assert_eq!(result.unwrap(), Version::new(22, 3, 0));
        }
        // A later caller reuses the memoized value too
        assert_eq!(resolver.resolve().await.unwrap(), Version::new(22, 3, 0));

        mock.assert_hits(1);
        assert_eq!(resolver.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/dist/index.json");
            then.status(503);
        });

        let resolver = resolver(&server, "1.x");
        assert!(resolver.resolve().await.is_err());
        assert!(resolver.resolve().await.is_err());
        mock.assert_hits(1);
    }

    fn arb_versions() -> impl Strategy<Value = Vec<Version>> {
        prop::collection::vec((0u64..5, 0u64..5, 0u64..5), 0..20).prop_map(|triples| {
            triples
                .into_iter()
                .map(|(major, minor, patch)| Version::new(major, minor, patch))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_resolution_is_order_independent(
            versions in arb_versions(),
            major in 0u64..5,
        ) {
            let selector = VersionSelector::parse(&format!("^{major}")).unwrap();
            let mut reversed = versions.clone();
            reversed.reverse();

            prop_assert_eq!(
                select_highest(&selector, &versions),
                select_highest(&selector, &reversed)
            );
        }

        #[test]
        fn prop_resolution_is_maximal(
            versions in arb_versions(),
            major in 0u64..5,
        ) {
            let selector = VersionSelector::parse(&format!(">={major}.0.0")).unwrap();
            match select_highest(&selector, &versions) {
                Some(best) => {
                    prop_assert!(selector.matches(best));
                    for v in versions.iter().filter(|v| selector.matches(v)) {
                        prop_assert!(v <= best);
                    }
                }
                None => prop_assert!(versions.iter().all(|v| !selector.matches(v))),
            }
        }
    }
}
