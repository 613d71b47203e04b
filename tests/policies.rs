#![forbid(unsafe_code)]
use sejour::{default_policy, Policy, PolicyStore};
use tempfile::tempdir;

#[test]
fn save_and_load_policy_roundtrip() {
    let dir = tempdir().unwrap();
    let store = PolicyStore::new(dir.path());
    let policy = sample_policy();
    store.save(&policy).unwrap();

    let loaded = store.load(&policy.id).unwrap();
    assert_eq!(loaded.id, policy.id);
    assert_eq!(loaded.green_floor, policy.green_floor);
    assert_eq!(loaded.amber_floor, policy.amber_floor);
}

#[test]
fn list_returns_saved_policies_sorted() {
    let dir = tempdir().unwrap();
    let store = PolicyStore::new(dir.path());
    let mut second = sample_policy();
    second.id = "zz-late".into();
    store.save(&second).unwrap();
    store.save(&sample_policy()).unwrap();

    let infos = store.list().unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].policy.id, "strict");
    assert_eq!(infos[1].policy.id, "zz-late");
}

#[test]
fn inverted_floors_are_rejected() {
    let mut policy = sample_policy();
    policy.amber_floor = 50;
    assert!(policy.validate().is_err());
    assert!(PolicyStore::new("unused").save(&policy).is_err());
}

#[test]
fn default_policy_matches_engine_defaults() {
    let policy = default_policy();
    policy.validate().unwrap();
    let thresholds = policy.thresholds();
    assert_eq!(thresholds.green_floor, 30);
    assert_eq!(thresholds.amber_floor, 10);
}

fn sample_policy() -> Policy {
    Policy {
        id: "strict".into(),
        name: "Seuils resserrés".into(),
        description: Some("Pour les gros voyageurs".into()),
        green_floor: 45,
        amber_floor: 20,
    }
}
