use crate::schema::{Channel, ConsentStatus, PhotoContext, RuleConditions};

/// Check whether every condition declared in `when` holds for `ctx`.
///
/// * Boolean fields and `consent_status` are equality checks.
/// * `channel_in` is a membership test on the context channel; an empty list
///   matches nothing.
/// * Absent fields are "don't care". Unrecognized keys never affect the result.
pub fn rule_matches(ctx: &PhotoContext, when: &RuleConditions) -> bool {
    flag_matches(when.minors, ctx.minors)
        && flag_matches(when.identifiable, ctx.identifiable)
        && flag_matches(when.group_photo, ctx.group_photo)
        && flag_matches(when.prominent_subject, ctx.prominent_subject)
        && consent_matches(when.consent_status.as_deref(), ctx.consent_status)
        && channel_matches(when.channel_in.as_deref(), ctx.channel)
}

fn flag_matches(expected: Option<bool>, actual: bool) -> bool {
    expected.map_or(true, |expected| expected == actual)
}

fn consent_matches(expected: Option<&str>, actual: ConsentStatus) -> bool {
    expected.map_or(true, |expected| expected == actual.as_str())
}

fn channel_matches(expected: Option<&[String]>, actual: Channel) -> bool {
    expected.map_or(true, |list| list.iter().any(|c| c == actual.as_str()))
}


#[cfg(test)]
pub(crate) mod proptests {
    use proptest::prelude::*;

    use super::*;

    pub(crate) fn arb_context() -> impl Strategy<Value = PhotoContext> {
        prop::sample::select(PhotoContext::all())
    }

    pub(crate) fn arb_conditions() -> impl Strategy<Value = RuleConditions> {
        let channel_names = Channel::ALL.map(|c| c.as_str().to_string()).to_vec();
        let consent_names = ConsentStatus::ALL.map(|c| c.as_str().to_string()).to_vec();
        (
            prop::array::uniform4(proptest::option::of(any::<bool>())),
            proptest::option::of(prop::sample::select(consent_names)),
            proptest::option::of(prop::sample::subsequence(channel_names, 0..=3)),
        )
            .prop_map(|(flags, consent_status, channel_in)| RuleConditions {
                minors: flags[0],
                identifiable: flags[1],
                group_photo: flags[2],
                prominent_subject: flags[3],
                consent_status,
                channel_in,
                ..RuleConditions::default()
            })
    }

    /// Keep only the conditions of `narrow` selected by `mask`.
    fn loosen(narrow: &RuleConditions, mask: [bool; 6]) -> RuleConditions {
        RuleConditions {
            minors: narrow.minors.filter(|_| mask[0]),
            identifiable: narrow.identifiable.filter(|_| mask[1]),
            group_photo: narrow.group_photo.filter(|_| mask[2]),
            prominent_subject: narrow.prominent_subject.filter(|_| mask[3]),
            consent_status: narrow.consent_status.clone().filter(|_| mask[4]),
            channel_in: narrow.channel_in.clone().filter(|_| mask[5]),
            ..RuleConditions::default()
        }
    }

    proptest! {
        #[test]
        fn fewer_conditions_match_a_superset(
            ctx in arb_context(),
            narrow in arb_conditions(),
            mask in any::<[bool; 6]>(),
        ) {
            let broad = loosen(&narrow, mask);
            if rule_matches(&ctx, &narrow) {
                prop_assert!(rule_matches(&ctx, &broad));
            }
        }

        #[test]
        fn unrecognized_keys_never_change_the_outcome(
            ctx in arb_context(),
            when in arb_conditions(),
            key in "[a-z_]{1,12}",
        ) {
            prop_assume!(!matches!(
                key.as_str(),
                "minors" | "identifiable" | "group_photo" | "prominent_subject"
                    | "consent_status" | "channel_in"
            ));
            let mut noisy = when.clone();
            noisy.unrecognized.insert(key, serde_json::Value::Bool(true));
            prop_assert_eq!(rule_matches(&ctx, &when), rule_matches(&ctx, &noisy));
        }
    }
}
