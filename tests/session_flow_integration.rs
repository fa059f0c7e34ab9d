//! End-to-end dialogue flow tests against the public crate surface,
//! using the built-in content pack.

use std::sync::Arc;

use lay_advisor::adapters::InMemoryTemplateStore;
use lay_advisor::application::{SessionOrchestrator, StreamHandle, DEFAULT_STREAM_BUFFER};
use lay_advisor::content::default_pack;
use lay_advisor::domain::foundation::SessionId;
use lay_advisor::domain::report::TemplateKey;
use lay_advisor::domain::session::Stage;
use lay_advisor::ports::TemplateStore;

fn orchestrator() -> SessionOrchestrator {
    let pack = default_pack();
    let store =
        Arc::new(InMemoryTemplateStore::from_pack(&pack).unwrap()) as Arc<dyn TemplateStore>;
    SessionOrchestrator::from_pack(&pack, store, DEFAULT_STREAM_BUFFER)
}

async fn full(mut stream: StreamHandle) -> String {
    stream.drain().await.unwrap_or_default()
}

async fn open(orch: &SessionOrchestrator) -> (SessionId, String) {
    let (id, stream) = orch.open_session().await.unwrap();
    (id, full(stream).await)
}

async fn say(orch: &SessionOrchestrator, id: &SessionId, input: &str) -> String {
    full(orch.handle_turn(*id, Some(input)).await.unwrap()).await
}

#[tokio::test]
async fn opening_presents_the_three_option_diagnostic() {
    let orch = orchestrator();
    let (id, prompt) = open(&orch).await;
    assert!(prompt.contains("【智商税测试】"));
    assert!(prompt.contains("A."));
    assert!(prompt.contains("B."));
    assert!(prompt.contains("C."));
    assert_eq!(orch.snapshot(&id).await.unwrap().stage(), Stage::Qualifying);
}

#[tokio::test]
async fn invalid_answer_is_rejected_without_advancing() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    let reply = say(&orch, &id, "d").await;
    assert!(reply.contains("别想糊弄过去"));
    assert_eq!(orch.snapshot(&id).await.unwrap().stage(), Stage::Qualifying);

    // Multi-token input is rejected the same way.
    let reply = say(&orch, &id, "a b").await;
    assert!(reply.contains("别想糊弄过去"));
    assert_eq!(orch.snapshot(&id).await.unwrap().stage(), Stage::Qualifying);
}

#[tokio::test]
async fn correct_answer_gets_the_passing_branch_and_the_brief_prompt() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    let reply = say(&orch, &id, " b ").await;
    assert!(reply.contains("勉强及格"));
    assert!(reply.contains("哪个城市"));
    assert_eq!(
        orch.snapshot(&id).await.unwrap().stage(),
        Stage::BriefCollection
    );
}

#[tokio::test]
async fn wrong_option_still_advances_with_the_scolding_branch() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    let reply = say(&orch, &id, "A").await;
    assert!(reply.contains("典型韭菜"));
    assert!(reply.contains("哪个城市"));
    assert_eq!(
        orch.snapshot(&id).await.unwrap().stage(),
        Stage::BriefCollection
    );
}

#[tokio::test]
async fn empty_brief_reprompts_without_advancing() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    let reply = say(&orch, &id, "   ").await;
    assert!(reply.contains("哪个城市"));
    assert_eq!(
        orch.snapshot(&id).await.unwrap().stage(),
        Stage::BriefCollection
    );
}

#[tokio::test]
async fn general_city_brief_starts_the_general_report() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    let report = say(&orch, &id, "我想在长沙开一家电竞主题酒店，预算200万").await;

    assert!(report.contains("识别城市：**长沙**"));
    assert!(report.contains("General"));
    assert!(report.contains("【通用生存模板】"));
    assert!(report.contains("### P1."));
    assert!(report.contains("### P3."));
    assert!(!report.contains("### P4."));
    assert!(report.contains("请输入“继续”查看 P4"));

    let snapshot = orch.snapshot(&id).await.unwrap();
    assert_eq!(snapshot.stage(), Stage::ReportStage(0));
    assert_eq!(snapshot.stage_cursor(), 1);
    assert_eq!(
        snapshot.selected_template_key(),
        Some(&TemplateKey::general())
    );
}

#[tokio::test]
async fn continuation_emits_the_final_group_and_completes() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    say(&orch, &id, "预算150万，想在长沙做民宿改造").await;
    let tail = say(&orch, &id, "继续").await;

    assert!(tail.contains("### P4."));
    assert_eq!(
        orch.snapshot(&id).await.unwrap().stage(),
        Stage::ReportComplete
    );

    // Any further input gets the completion acknowledgment.
    let ack = say(&orch, &id, "然后呢").await;
    assert!(ack.contains("已全部输出完毕"));
    assert_eq!(
        orch.snapshot(&id).await.unwrap().stage(),
        Stage::ReportComplete
    );
}

#[tokio::test]
async fn continuation_is_permissive_about_its_wording() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    say(&orch, &id, "长沙，预算300万").await;
    let tail = say(&orch, &id, "好的下一页").await;
    assert!(tail.contains("### P4."));
}

#[tokio::test]
async fn top_tier_city_routes_to_the_tier1_template() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    let report = say(&orch, &id, "我想在上海静安区开一家设计酒店").await;

    assert!(report.contains("识别城市：**上海**"));
    assert!(report.contains("Tier1"));
    assert!(report.contains("【一线城市高周转模板】"));
    assert_eq!(
        orch.snapshot(&id).await.unwrap().selected_template_key(),
        Some(&TemplateKey::tier1())
    );
}

#[tokio::test]
async fn aliased_city_resolves_to_its_canonical_name() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    let report = say(&orch, &id, "北京五环外，预算500万").await;
    assert!(report.contains("识别城市：**上海**"));
    assert!(report.contains("Tier1"));
}

#[tokio::test]
async fn unrecognized_city_falls_back_to_the_general_report() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    let report = say(&orch, &id, "我想在鹤岗买栋楼做青旅").await;
    assert!(report.contains("识别城市：**未知城市**"));
    assert!(report.contains("General"));
    assert_eq!(
        orch.snapshot(&id).await.unwrap().selected_template_key(),
        Some(&TemplateKey::general())
    );
}

#[tokio::test]
async fn abandoned_stream_leaves_the_committed_state_intact() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;

    // Drop the report stream after a single fragment.
    let mut stream = orch
        .handle_turn(id, Some("长沙，预算100万"))
        .await
        .unwrap();
    let first = stream.next_fragment().await.unwrap();
    assert!(!first.is_empty());
    drop(stream);

    // The stage advanced anyway; continuation works as if fully read.
    assert_eq!(
        orch.snapshot(&id).await.unwrap().stage(),
        Stage::ReportStage(0)
    );
    let tail = say(&orch, &id, "继续").await;
    assert!(tail.contains("### P4."));
}

#[tokio::test]
async fn sessions_progress_independently() {
    let orch = orchestrator();
    let (first, _) = open(&orch).await;
    let (second, _) = open(&orch).await;

    say(&orch, &first, "b").await;
    say(&orch, &first, "长沙，预算100万").await;
    say(&orch, &second, "c").await;

    assert_eq!(
        orch.snapshot(&first).await.unwrap().stage(),
        Stage::ReportStage(0)
    );
    assert_eq!(
        orch.snapshot(&second).await.unwrap().stage(),
        Stage::BriefCollection
    );
}

#[tokio::test]
async fn transcript_alternates_and_hides_nothing_visible() {
    let orch = orchestrator();
    let (id, _) = open(&orch).await;
    say(&orch, &id, "b").await;
    say(&orch, &id, "长沙，预算100万").await;

    let snapshot = orch.snapshot(&id).await.unwrap();
    // open + (user, assistant) * 2
    assert_eq!(snapshot.turns().len(), 5);
    assert_eq!(snapshot.visible_turns().count(), 5);
    let sequences: Vec<u64> = snapshot.turns().iter().map(|t| t.sequence_number()).collect();
    assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn streamed_fragments_are_prefixes_of_the_full_reply() {
    let orch = orchestrator();
    let (_, mut stream) = orch.open_session().await.unwrap();
    let full_text = stream.full_text().to_string();
    let mut previous = String::new();
    let mut last = String::new();
    while let Some(fragment) = stream.next_fragment().await {
        assert!(fragment.starts_with(&previous));
        previous = fragment.clone();
        last = fragment;
    }
    assert_eq!(last, full_text);
}
