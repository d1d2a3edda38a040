//! End-to-end reaction flows as a host application uses them
//!
//! The in-memory scenarios always run. The PostgreSQL scenarios require
//! DATABASE_URL and skip otherwise.
//!
//! Run with: cargo test -p integration-tests --test reaction_flow_tests

use integration_tests::{check_test_env, content_registry, member, Catalog, Content, TestDatabase};
use reaction_core::entities::{ReactOutcome, ReactionCounts, ToggleOutcome};
use reaction_core::traits::{Reactable, ReactionFilter, Reactor};
use reaction_core::value_objects::ReactionKind;
use reaction_service::{ReactionService, ReactorService, ServiceContext};

// ============================================================================
// In-memory host flows
// ============================================================================

#[tokio::test]
async fn test_article_voting_flow() {
    let ctx = ServiceContext::in_memory();
    let reactions = ReactionService::new(&ctx);
    let catalog = Catalog::new();
    let article = catalog.add_article("Ownership explained");
    let target = article.reactable_ref();

    let voters: Vec<_> = ["ann", "ben", "cat", "dan"].into_iter().map(member).collect();
    for voter in &voters[..3] {
        reactions.like(&target, voter.reactor_id()).await.unwrap();
    }
    reactions.dislike(&target, voters[3].reactor_id()).await.unwrap();

    assert_eq!(reactions.counts(&target).await.unwrap(), ReactionCounts::new(3, 1));
    assert_eq!(reactions.like_percentage(&target).await.unwrap(), 75);
    assert_eq!(reactions.dislike_percentage(&target).await.unwrap(), 25);

    // ben switches to dislike
    let outcome = reactions.dislike(&target, voters[1].reactor_id()).await.unwrap();
    assert_eq!(
        outcome,
        ReactOutcome::Switched {
            from: ReactionKind::Like
        }
    );
    assert_eq!(reactions.counts(&target).await.unwrap(), ReactionCounts::new(2, 2));
    assert_eq!(reactions.like_percentage(&target).await.unwrap(), 50);

    let dislikers = reactions
        .reactors(&target, ReactionKind::Dislike, 10)
        .await
        .unwrap();
    // Ordered by when the record was created, not when it last switched
    assert_eq!(dislikers, vec![voters[1].reactor_id(), voters[3].reactor_id()]);
}

#[tokio::test]
async fn test_counters_match_records() {
    let ctx = ServiceContext::in_memory();
    let reactions = ReactionService::new(&ctx);
    let catalog = Catalog::new();
    let target = catalog.add_video("https://example.com/v/1").reactable_ref();
    let voters: Vec<_> = (0..6).map(|i| member(&format!("voter{i}"))).collect();

    // A mixed sequence of operations
    for (i, voter) in voters.iter().enumerate() {
        let id = voter.reactor_id();
        reactions.like(&target, id).await.unwrap();
        if i % 2 == 0 {
            reactions.dislike(&target, id).await.unwrap();
        }
        if i % 3 == 0 {
            reactions.toggle(&target, id, ReactionKind::Dislike).await.unwrap();
        }
        reactions.like(&target, id).await.unwrap();
    }
    reactions.un_like(&target, voters[5].reactor_id()).await.unwrap();

    let counts = reactions.counts(&target).await.unwrap();
    let likes = reactions
        .count_matching(&target, &ReactionFilter::kind(ReactionKind::Like))
        .await
        .unwrap();
    let dislikes = reactions
        .count_matching(&target, &ReactionFilter::kind(ReactionKind::Dislike))
        .await
        .unwrap();
    assert_eq!(counts, ReactionCounts::new(likes, dislikes));
}

#[tokio::test]
async fn test_toggle_from_a_button() {
    let ctx = ServiceContext::in_memory();
    let reactions = ReactionService::new(&ctx);
    let target = Catalog::new().add_article("Lifetimes").reactable_ref();
    let user = member("eve").reactor_id();

    let like = ReactionKind::Like;
    assert_eq!(reactions.toggle(&target, user, like).await.unwrap(), ToggleOutcome::Added);
    assert_eq!(reactions.toggle(&target, user, like).await.unwrap(), ToggleOutcome::Removed);
    assert_eq!(reactions.counts(&target).await.unwrap(), ReactionCounts::default());
}

#[tokio::test]
async fn test_member_reaction_history() {
    let ctx = ServiceContext::in_memory();
    let reactions = ReactionService::new(&ctx);
    let catalog = Catalog::new();
    let registry = content_registry(&catalog);

    let first = catalog.add_article("First");
    let clip = catalog.add_video("https://example.com/v/2");
    let second = catalog.add_article("Second");
    let fan = member("fan");

    reactions.like(&first.reactable_ref(), fan.reactor_id()).await.unwrap();
    reactions.like(&clip.reactable_ref(), fan.reactor_id()).await.unwrap();
    reactions.dislike(&second.reactable_ref(), fan.reactor_id()).await.unwrap();

    let reactor = ReactorService::new(&ctx);
    let likes = reactor.likes(&fan, &registry).await.unwrap();
    assert_eq!(likes, vec![Content::Article(first.clone()), Content::Video(clip)]);

    let dislikes = reactor.dislikes(&fan, &registry).await.unwrap();
    assert_eq!(dislikes, vec![Content::Article(second)]);

    // The host deletes an article without running the deletion hook
    catalog.remove_article(first.id);
    let likes = reactor.likes(&fan, &registry).await.unwrap();
    assert_eq!(likes.len(), 1);
}

#[tokio::test]
async fn test_deleting_entity_runs_hook() {
    let ctx = ServiceContext::in_memory();
    let reactions = ReactionService::new(&ctx);
    let catalog = Catalog::new();
    let article = catalog.add_article("Doomed");
    let target = article.reactable_ref();
    let reader = member("reader");

    reactions.like(&target, reader.reactor_id()).await.unwrap();

    catalog.remove_article(article.id);
    assert_eq!(reactions.on_reactable_deleted(&target).await.unwrap(), 1);

    let history = ReactorService::new(&ctx)
        .reacted_targets(&reader, ReactionKind::Like)
        .await
        .unwrap();
    assert!(history.is_empty());
    assert!(!reactions.has_reaction(&target, &ReactionFilter::any()).await.unwrap());
}

// ============================================================================
// PostgreSQL flows
// ============================================================================

#[tokio::test]
async fn test_pg_like_switch_undo() {
    if !check_test_env() {
        return;
    }

    let db = TestDatabase::start().await.expect("Failed to start database");
    let reactions = ReactionService::new(&db.ctx);
    let target = Catalog::new().add_article("Persisted").reactable_ref();
    let user = member("pg-user");
    db.insert_member(&user).await.unwrap();

    reactions.like(&target, user.reactor_id()).await.unwrap();
    reactions.dislike(&target, user.reactor_id()).await.unwrap();
    assert_eq!(reactions.counts(&target).await.unwrap(), ReactionCounts::new(0, 1));

    assert!(!reactions.un_like(&target, user.reactor_id()).await.unwrap());
    assert!(reactions.un_dislike(&target, user.reactor_id()).await.unwrap());
    assert_eq!(reactions.counts(&target).await.unwrap(), ReactionCounts::new(0, 0));
    assert_eq!(reactions.like_percentage(&target).await.unwrap(), 0);

    // Clean up
    reactions.delete_all(&target).await.unwrap();
    db.delete_member(&user).await.unwrap();
}

#[tokio::test]
async fn test_pg_member_deletion() {
    if !check_test_env() {
        return;
    }

    let db = TestDatabase::start().await.expect("Failed to start database");
    let reactions = ReactionService::new(&db.ctx);
    let catalog = Catalog::new();
    let registry = content_registry(&catalog);
    let article = catalog.add_article("Shared");
    let target = article.reactable_ref();

    let leaving = member("leaving");
    let staying = member("staying");
    db.insert_member(&leaving).await.unwrap();
    db.insert_member(&staying).await.unwrap();

    reactions.like(&target, leaving.reactor_id()).await.unwrap();
    reactions.like(&target, staying.reactor_id()).await.unwrap();

    let reactor = ReactorService::new(&db.ctx);
    assert_eq!(
        reactor.likes(&leaving, &registry).await.unwrap(),
        vec![Content::Article(article)]
    );

    assert_eq!(reactor.delete_all(&leaving).await.unwrap(), 1);
    db.delete_member(&leaving).await.unwrap();
    assert_eq!(reactions.counts(&target).await.unwrap(), ReactionCounts::new(1, 0));

    // Clean up
    reactions.delete_all(&target).await.unwrap();
    db.delete_member(&staying).await.unwrap();
}

#[tokio::test]
async fn test_pg_connect_from_config() {
    if !check_test_env() {
        return;
    }

    // Ensure the host table exists before connect runs migrations
    let db = TestDatabase::start().await.expect("Failed to start database");
    drop(db);

    let config = integration_tests::test_config().unwrap();
    let ctx = ServiceContext::connect(&config).await.unwrap();
    let target = Catalog::new().add_video("https://example.com/v/3").reactable_ref();

    let counts = ReactionService::new(&ctx).counts(&target).await.unwrap();
    assert_eq!(counts, ReactionCounts::default());
}
