// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Body-part injury taxonomy offered during onboarding.

/// A selectable body part and the injuries that can be recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyPart {
    pub key: &'static str,
    pub label: &'static str,
    pub injuries: &'static [&'static str],
}

pub const BODY_PARTS: &[BodyPart] = &[
    BodyPart { key: "head", label: "Head", injuries: &["Concussion", "Migraine", "Whiplash"] },
    BodyPart { key: "neck", label: "Neck", injuries: &["Strain", "Whiplash"] },
    BodyPart { key: "chest", label: "Chest", injuries: &["Rib Fracture", "Muscle Strain"] },
    BodyPart { key: "abdomen", label: "Abdomen", injuries: &["Muscle Strain", "Hernia"] },
    BodyPart {
        key: "back",
        label: "Back",
        injuries: &["Lower Back Strain", "Herniated Disc", "Sciatica"],
    },
    BodyPart {
        key: "leftShoulder",
        label: "Left Shoulder",
        injuries: &["Rotator Cuff Injury", "Dislocation", "Impingement"],
    },
    BodyPart {
        key: "rightShoulder",
        label: "Right Shoulder",
        injuries: &["Rotator Cuff Injury", "Dislocation", "Impingement"],
    },
    BodyPart { key: "leftArm", label: "Left Arm", injuries: &["Biceps Tear", "Fracture"] },
    BodyPart { key: "rightArm", label: "Right Arm", injuries: &["Biceps Tear", "Fracture"] },
    BodyPart { key: "leftHand", label: "Left Hand", injuries: &["Sprain", "Fracture"] },
    BodyPart { key: "rightHand", label: "Right Hand", injuries: &["Sprain", "Fracture"] },
    BodyPart {
        key: "leftLeg",
        label: "Left Leg",
        injuries: &["ACL Tear", "Meniscus Tear", "Fracture"],
    },
    BodyPart {
        key: "rightLeg",
        label: "Right Leg",
        injuries: &["ACL Tear", "Meniscus Tear", "Fracture"],
    },
    BodyPart { key: "leftFoot", label: "Left Foot", injuries: &["Sprain", "Fracture"] },
    BodyPart { key: "rightFoot", label: "Right Foot", injuries: &["Sprain", "Fracture"] },
];

/// Look up a body part by its key.
pub fn body_part(key: &str) -> Option<&'static BodyPart> {
    BODY_PARTS.iter().find(|part| part.key == key)
}

/// Whether any body part lists this injury.
pub fn is_known_injury(name: &str) -> bool {
    BODY_PARTS.iter().any(|part| part.injuries.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workout::sample_workouts;

    #[test]
    fn test_body_part_lookup() {
        assert_eq!(body_part("neck").map(|p| p.label), Some("Neck"));
        assert!(body_part("tail").is_none());
    }

    #[test]
    fn test_every_sample_tag_is_selectable() {
        for workout in sample_workouts() {
            for tag in &workout.injuries {
                assert!(is_known_injury(tag), "{} is not selectable", tag);
            }
        }
    }
}
