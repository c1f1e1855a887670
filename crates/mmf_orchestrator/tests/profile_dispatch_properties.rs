//! Property tests for the MMF job-name and `MMF_ERROR_ID` invariants a
//! profile dispatch must hold across arbitrarily generated profile ID
//! halves (§8 invariants 4 and 5).

use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;

use mmf_orchestrator::context::OrchestratorContext;
use mmf_orchestrator::profile_dispatcher::ProfileDispatcher;
use mmf_protocol::{JobDescriptor, OrchestratorConfig};
use mmf_scheduler::FakeSchedulerClient;
use mmf_state_store::FakeStateStore;

fn dispatch_one(mo: &str, prof: &str) -> JobDescriptor {
    let store = Arc::new(FakeStateStore::new());
    let mut fields = HashMap::new();
    fields.insert("properties".to_string(), "{}".to_string());
    store.seed_hash(prof, fields);
    let scheduler = Arc::new(FakeSchedulerClient::new());
    let ctx = OrchestratorContext::new(
        store,
        scheduler.clone(),
        Arc::new(OrchestratorConfig::default()),
        "default".to_string(),
    );
    let dispatcher = ProfileDispatcher::new(ctx);

    let rt = tokio::runtime::Runtime::new().expect("tokio runtime for property test");
    rt.block_on(dispatcher.dispatch(format!("{mo}.{prof}")));

    scheduler
        .submitted()
        .into_iter()
        .next()
        .expect("a well-formed profile id with a readable hash always dispatches a job")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn job_name_matches_mmf_pattern(
        mo in "[a-zA-Z0-9_]{1,16}",
        prof in "[a-zA-Z0-9_]{1,16}",
    ) {
        let job = dispatch_one(&mo, &prof);
        let mut segments = job.name.split('.');
        let timestamp = segments.next().unwrap_or("");
        prop_assert!(!timestamp.is_empty() && timestamp.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(segments.next(), Some(mo.as_str()));
        prop_assert_eq!(segments.next(), Some(prof.as_str()));
        prop_assert_eq!(segments.next(), Some("mmf"));
        prop_assert_eq!(segments.next(), None);
    }

    #[test]
    fn mmf_error_id_round_trips_the_popped_profile_id(
        mo in "[a-zA-Z0-9_]{1,16}",
        prof in "[a-zA-Z0-9_]{1,16}",
    ) {
        let profile_id = format!("{mo}.{prof}");
        let job = dispatch_one(&mo, &prof);
        let error_id = job
            .env
            .iter()
            .find(|e| e.name == "MMF_ERROR_ID")
            .map(|e| e.value.clone());
        prop_assert_eq!(error_id, Some(profile_id));
    }
}
