use crate::common::{legacy, split, unified, unified_expressible_facts, Facts};
use addon_sigview::{adapt, classify, SigningState};

#[test]
fn all_shapes_agree_on_state() {
    for facts in unified_expressible_facts() {
        let states = [
            classify(&adapt(&legacy(facts))),
            classify(&adapt(&split(facts))),
            classify(&adapt(&unified(facts))),
        ];
        assert!(
            states.iter().all(|s| *s == states[0]),
            "shapes disagree for {:?}: {:?}",
            facts,
            states
        );
    }
}

#[test]
fn all_shapes_agree_on_environment() {
    for facts in unified_expressible_facts() {
        let envs = [
            adapt(&legacy(facts)).environment,
            adapt(&split(facts)).environment,
            adapt(&unified(facts)).environment,
        ];
        assert!(envs.iter().all(|e| *e == envs[0]), "{:?}", facts);
    }
}

#[test]
fn cose_capable_shapes_agree_on_dual_signing() {
    let facts = Facts {
        pkcs7: true,
        cose: true,
        staging: false,
    };
    assert_eq!(classify(&adapt(&legacy(facts))), SigningState::DualSigned);
    assert_eq!(classify(&adapt(&split(facts))), SigningState::DualSigned);
    // The unified shape cannot express COSE, so it can only say PKCS#7.
    assert_eq!(classify(&adapt(&unified(facts))), SigningState::Pkcs7Only);
}

#[test]
fn signed_states_are_ordered_by_strength() {
    let unsigned = Facts {
        pkcs7: false,
        cose: false,
        staging: false,
    };
    let pkcs7 = Facts {
        pkcs7: true,
        ..unsigned
    };
    let dual = Facts {
        cose: true,
        ..pkcs7
    };
    let states: Vec<SigningState> = [unsigned, pkcs7, dual]
        .into_iter()
        .map(|f| classify(&adapt(&split(f))))
        .collect();
    assert!(states.windows(2).all(|w| w[0] < w[1]));
}
