//! Ambient context store: scope isolation and replacement semantics.

use logmux_core::{current_context, scope, set_context, RequestContext};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn concurrent_scopes_never_observe_each_other() {
    // Many interleaved request executions, each setting and re-reading its
    // own identity across suspension points.
    let handles: Vec<_> = (0..16)
        .map(|i| {
            tokio::spawn(scope(RequestContext::new(), async move {
                let user_id = format!("user-{i}");
                let request_id = format!("req-{i}");
                set_context(
                    RequestContext::new()
                        .with_request_id(request_id.as_str())
                        .with_user_id(user_id.as_str()),
                );

                for _ in 0..50 {
                    tokio::task::yield_now().await;
                    let ctx = current_context();
                    assert_eq!(ctx.user_id, user_id);
                    assert_eq!(ctx.request_id, request_id);
                }
            }))
        })
        .collect();

    for handle in futures::future::join_all(handles).await {
        handle.expect("task completed");
    }
}

#[tokio::test]
async fn set_with_no_fields_resets_to_full_defaults() {
    scope(
        RequestContext::new()
            .with_request_id("req-1")
            .with_user_id("u1")
            .with_extra("tenant", Value::String("acme".into())),
        async {
            set_context(RequestContext::new());

            let ctx = current_context();
            assert_eq!(ctx.request_id, "-");
            assert_eq!(ctx.user_id, "-");
            assert_eq!(ctx.extra, None);
        },
    )
    .await;
}

#[tokio::test]
async fn setting_one_field_does_not_merge_the_rest() {
    scope(RequestContext::new().with_request_id("req-1"), async {
        set_context(RequestContext::new().with_user_id("u1"));

        let ctx = current_context();
        assert_eq!(ctx.user_id, "u1");
        // Not merged: the previous request id is gone
        assert_eq!(ctx.request_id, "-");
    })
    .await;
}

#[tokio::test]
async fn projection_omits_absent_extra_and_keeps_identity() {
    let ctx = RequestContext::new();
    let map = ctx.as_map();
    assert_eq!(map.get("request_id"), Some(&Value::String("-".into())));
    assert_eq!(map.get("user_id"), Some(&Value::String("-".into())));
    assert!(map.get("extra").is_none());
    assert!(map.values().all(|v| !v.is_null()));

    let map = ctx
        .with_extra("tenant", Value::String("acme".into()))
        .as_map();
    assert_eq!(map.get("tenant"), Some(&Value::String("acme".into())));
}

#[tokio::test]
async fn reading_without_any_scope_yields_defaults() {
    let ctx = current_context();
    assert_eq!(ctx.request_id, "-");
    assert_eq!(ctx.user_id, "-");
    assert!(!ctx.timestamp.is_empty());
}
