// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::{ErrorKind, StateError};
use crate::hash;
use crate::mutation::add_validators::transform_add_validators;
use crate::mutation::{new_add_validators, AnyPayload, SignedMutation, SignedMutationList};
use crate::tests::fixtures::{
    add_validators, approvals, engine, genesis, init_tracing, keys, parse_all, validator_addrs, CLOCK,
};

#[test]
fn test_composite_equals_sequential_application() {
    init_tracing();
    let engine = engine();
    let keys = keys(4);
    let cluster = genesis(&keys);
    let parent = hash::cluster_hash(&cluster).unwrap();
    let vals = validator_addrs(1, 3);
    let av = add_validators(&parent, &keys, &vals);

    let via_composite = engine.transform(&cluster, &av.composite).unwrap();
    let sequential = engine
        .transform(&engine.transform(&cluster, &av.gen).unwrap(), &av.approvals)
        .unwrap();

    assert_eq!(via_composite, sequential);
    assert_eq!(via_composite.validators(), parse_all(&vals).as_slice());
}

#[test]
fn test_builder_links_children() {
    let keys = keys(4);
    let av = add_validators(&[3; 32], &keys, &validator_addrs(1, 1));

    assert_eq!(av.composite.kind(), "addvalidators");
    assert_eq!(av.composite.parent(), av.gen.parent());
    assert!(!av.composite.is_signed());
    assert_eq!(av.approvals.parent(), hash::hash(&av.gen).unwrap().as_slice());

    let list: SignedMutationList = av.composite.mutation.data.unpack().unwrap();
    assert_eq!(list.mutations, vec![av.gen, av.approvals]);
}

#[test]
fn test_builder_rejects_wrong_child_types() {
    let keys = keys(4);
    let av = add_validators(&[3; 32], &keys, &validator_addrs(1, 1));

    let err = new_add_validators(&CLOCK, &av.approvals, &av.approvals).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.steps(), vec!["gen validators"]);

    let err = new_add_validators(&CLOCK, &av.gen, &av.gen).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.steps(), vec!["node approvals"]);
}

#[test]
fn test_tampered_approvals_parent_rejected() {
    let engine = engine();
    let keys = keys(4);
    let cluster = genesis(&keys);
    let before = cluster.clone();
    let av = add_validators(&[0; 32], &keys, &validator_addrs(1, 2));

    // Approvals correctly signed, but over a different gen validators mutation.
    let tampered = approvals(&[0xee; 32], &keys);
    let composite = new_add_validators(&CLOCK, &av.gen, &tampered).unwrap();

    let first = engine.transform(&cluster, &composite).unwrap_err();
    let second = engine.transform(&cluster, &composite).unwrap_err();

    assert_eq!(first.kind(), ErrorKind::Linkage);
    assert_eq!(first.steps(), vec!["invalid node approvals parent"]);
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(cluster, before);
}

#[test]
fn test_gen_parent_must_match_composite() {
    let engine = engine();
    let keys = keys(4);
    let cluster = genesis(&keys);
    let mut av = add_validators(&[0; 32], &keys, &validator_addrs(1, 1));
    av.composite.mutation.parent = vec![1; 32];

    let err = engine.transform(&cluster, &av.composite).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Linkage);
    assert_eq!(err.steps(), vec!["invalid gen validators parent"]);
}

fn with_children(template: &SignedMutation, children: Vec<SignedMutation>) -> SignedMutation {
    let mut composite = template.clone();
    composite.mutation.data = AnyPayload::pack(&SignedMutationList { mutations: children }).unwrap();
    composite
}

#[test]
fn test_list_length_must_be_two() {
    let engine = engine();
    let keys = keys(4);
    let cluster = genesis(&keys);
    let av = add_validators(&[0; 32], &keys, &validator_addrs(1, 1));

    let cases = vec![
        vec![],
        vec![av.gen.clone()],
        vec![av.gen.clone(), av.approvals.clone(), av.approvals.clone()],
        vec![av.gen.clone(), av.approvals.clone(), av.gen.clone(), av.approvals.clone()],
    ];
    for children in cases {
        let found = children.len();
        let err = engine.transform(&cluster, &with_children(&av.composite, children)).unwrap_err();
        assert!(
            matches!(err, StateError::InvalidListLength { expected: 2, found: f } if f == found),
            "unexpected error for {} children: {}",
            found,
            err
        );
    }
}

#[test]
fn test_children_order_enforced() {
    let engine = engine();
    let keys = keys(4);
    let cluster = genesis(&keys);
    let av = add_validators(&[0; 32], &keys, &validator_addrs(1, 1));

    let swapped = with_children(&av.composite, vec![av.approvals.clone(), av.gen.clone()]);
    let err = engine.transform(&cluster, &swapped).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.steps(), vec!["gen validators"]);

    let doubled = with_children(&av.composite, vec![av.gen.clone(), av.gen.clone()]);
    let err = engine.transform(&cluster, &doubled).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.steps(), vec!["node approvals"]);
}

#[test]
fn test_composite_rejects_signatures() {
    let engine = engine();
    let keys = keys(4);
    let cluster = genesis(&keys);
    let av = add_validators(&[0; 32], &keys, &validator_addrs(1, 1));

    let signed = keys[0].sign(av.composite);
    let err = transform_add_validators(&engine, &cluster, &signed).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignaturePresence);
}

#[test]
fn test_failing_child_aborts_composite() {
    let engine = engine();
    let keys = keys(4);
    let cluster = genesis(&keys);
    let av = add_validators(&[0; 32], &keys, &validator_addrs(1, 1));

    // Signatures are not hashed, so linkage still holds; the gen transform
    // itself must reject the signed child.
    let signed_gen = av.gen.clone().with_signature(vec![9; 32], vec![9; 32]);
    let composite = with_children(&av.composite, vec![signed_gen, av.approvals.clone()]);
    let err = engine.transform(&cluster, &composite).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignaturePresence);
    assert_eq!(err.steps(), vec!["transform gen validators", "verify empty sig"]);

    // Approvals from only some operators fail after validators were generated.
    let partial = approvals(&hash::hash(&av.gen).unwrap(), &keys[..2]);
    let composite = new_add_validators(&CLOCK, &av.gen, &partial).unwrap();
    let err = engine.transform(&cluster, &composite).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(err.steps(), vec!["transform node approvals"]);
    assert!(cluster.validators().is_empty());
}
