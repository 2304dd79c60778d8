//! Attribute a room recommendation to the member it suits best.

use crate::types::RoomMember;
use data_loader::{normalize_key, LiquorRecord};

/// Points for the record's category matching the member's favorite spirit
const SPIRIT_POINTS: u32 = 3;
/// Points for the record's ABV being within 5 of the member's average
const ABV_POINTS: u32 = 2;
const ABV_TOLERANCE: f64 = 5.0;

/// Username of the member whose profile best matches `record`.
///
/// The first member with the highest score wins. Returns `None` only for
/// an empty room.
pub fn find_influential_user<'a>(record: &LiquorRecord, members: &'a [RoomMember]) -> Option<&'a str> {
    let category = record.category.as_deref().map(normalize_key);
    let abv = record.effective_abv();

    let mut best: Option<(&RoomMember, u32)> = None;
    for member in members {
        let mut score = 0;
        if category.as_deref() == Some(normalize_key(member.profile.favorite_spirit()).as_str()) {
            score += SPIRIT_POINTS;
        }
        if abv.is_some_and(|abv| (abv - member.profile.target_abv()).abs() <= ABV_TOLERANCE) {
            score += ABV_POINTS;
        }

        if best.is_none_or(|(_, top)| score > top) {
            best = Some((member, score));
        }
    }

    best.map(|(member, _)| member.username.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TasteProfile;

    fn member(name: &str, spirit: &str, avg_proof: f64) -> RoomMember {
        RoomMember {
            username: name.to_string(),
            profile: TasteProfile {
                avg_proof,
                favorite_spirits: vec![spirit.to_string()],
                ..TasteProfile::default()
            },
        }
    }

    #[test]
    fn test_spirit_match_outweighs_abv() {
        let record = LiquorRecord::new(1, "Gin").with_category("Gin").with_abv(47.0);
        let members = vec![member("ana", "vodka", 94.0), member("ben", "gin", 80.0)];
        assert_eq!(find_influential_user(&record, &members), Some("ben"));
    }

    #[test]
    fn test_first_member_wins_ties() {
        let record = LiquorRecord::new(1, "Rum").with_category("rum");
        let members = vec![member("ana", "gin", 80.0), member("ben", "vodka", 80.0)];
        assert_eq!(find_influential_user(&record, &members), Some("ana"));
    }

    #[test]
    fn test_empty_room() {
        let record = LiquorRecord::new(1, "Rum");
        assert_eq!(find_influential_user(&record, &[]), None);
    }
}
