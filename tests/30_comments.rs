mod common;

use std::collections::HashSet;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use redditscout::services::CommentService;

#[tokio::test]
async fn pending_list_deserializes_the_wire_shape() -> Result<()> {
    let stub = common::spawn_stub(|_, _| {
        (
            StatusCode::OK,
            json!({
                "data": [
                    {
                        "id": 1,
                        "postTitle": "Looking for a project management tool",
                        "subreddit": "startups",
                        "generatedComment": "Have you considered TaskMaster Pro?",
                        "opportunityScore": 87,
                        "productName": "TaskMaster Pro"
                    },
                    {
                        "id": 2,
                        "postTitle": "Code reviews are taking forever",
                        "subreddit": "programming",
                        "generatedComment": "We had the same issue...",
                        "opportunityScore": 92,
                        "productName": "CodeReview AI"
                    }
                ]
            }),
        )
    })
    .await;

    let (session, _dir) = common::temp_session("pending");
    session.establish(common::test_session("tok"))?;
    let service = CommentService::new(common::gateway(&stub.base_url, 25, &session));

    let comments = service.pending().await?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].opportunity_score, 92);
    assert_eq!(stub.requests()[0].action(), "getPendingComments");
    Ok(())
}

#[tokio::test]
async fn bulk_approve_fans_out_one_call_per_id() -> Result<()> {
    let stub = common::spawn_stub(|_, body| {
        assert_eq!(body["action"], "approveComment");
        (StatusCode::OK, json!({ "data": null }))
    })
    .await;

    let (session, _dir) = common::temp_session("bulk-ok");
    session.establish(common::test_session("tok"))?;
    let service = CommentService::new(common::gateway(&stub.base_url, 25, &session));

    let ids = [1, 2, 3, 4, 5];
    let outcome = service.approve_all(&ids).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.requested, 5);
    assert_eq!(outcome.succeeded, 5);
    assert_eq!(stub.hit_count(), 5);

    // Five independent envelopes, one per id, in no particular order
    let seen: HashSet<i64> = stub
        .requests()
        .iter()
        .map(|r| r.body["id"].as_i64().unwrap())
        .collect();
    assert_eq!(seen, ids.iter().copied().collect());
    Ok(())
}

#[tokio::test]
async fn bulk_approve_reports_aggregate_failure_without_rollback() -> Result<()> {
    // Id 3 fails permanently; the rest succeed on first attempt
    let stub = common::spawn_stub(|_, body| {
        if body["id"] == json!(3) {
            (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "reddit unavailable" }))
        } else {
            (StatusCode::OK, json!({ "data": null }))
        }
    })
    .await;

    let (session, _dir) = common::temp_session("bulk-partial");
    session.establish(common::test_session("tok"))?;
    let service = CommentService::new(common::gateway(&stub.base_url, 25, &session));

    let outcome = service.approve_all(&[1, 2, 3, 4, 5]).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.succeeded, 4);
    assert_eq!(outcome.failed, 1);
    assert!(outcome.first_error.unwrap().contains("reddit unavailable"));

    // The failing id burned its full retry budget; the other four were
    // applied once each and stay applied
    assert_eq!(stub.hit_count(), 4 + 4);
    Ok(())
}

#[tokio::test]
async fn reject_all_settles_every_call_before_returning() -> Result<()> {
    let stub = common::spawn_stub(|_, body| {
        assert_eq!(body["action"], "rejectComment");
        (StatusCode::OK, json!({ "data": null }))
    })
    .await;

    let (session, _dir) = common::temp_session("bulk-reject");
    session.establish(common::test_session("tok"))?;
    let service = CommentService::new(common::gateway(&stub.base_url, 25, &session));

    let outcome = service.reject_all(&[10, 11, 12]).await;
    assert!(outcome.is_success());
    assert_eq!(stub.hit_count(), 3);
    // Reason defaults to empty, matching the wire contract
    assert!(stub.requests().iter().all(|r| r.body["reason"] == json!("")));
    Ok(())
}
