//! Property tests for `ProfileId::split` (§8 invariant 5's precondition: a
//! profile id only ever resolves to its two halves when dot-separated, with
//! both halves non-empty and dot-free).

use proptest::prelude::*;

use mmf_protocol::ProfileId;

proptest! {
    #[test]
    fn well_formed_ids_split_to_exact_halves(
        mo in "[a-zA-Z0-9_-]{1,32}",
        prof in "[a-zA-Z0-9_-]{1,32}",
    ) {
        let id = ProfileId::new(format!("{mo}.{prof}"));
        let parts = id.split().expect("single dot, both halves non-empty, must split");
        prop_assert_eq!(parts.match_object_id, mo);
        prop_assert_eq!(parts.profile_id, prof);
    }

    #[test]
    fn ids_without_any_dot_never_split(id in "[a-zA-Z0-9_-]{1,64}") {
        prop_assert!(ProfileId::new(id).split().is_err());
    }

    #[test]
    fn ids_with_an_extra_dot_never_split(
        mo in "[a-zA-Z0-9_-]{1,16}",
        prof1 in "[a-zA-Z0-9_-]{1,16}",
        prof2 in "[a-zA-Z0-9_-]{1,16}",
    ) {
        let id = ProfileId::new(format!("{mo}.{prof1}.{prof2}"));
        prop_assert!(id.split().is_err());
    }
}
