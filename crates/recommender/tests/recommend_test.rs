//! End-to-end checks: bar JSON in, candidates out.

use data_loader::{Catalog, LiquorRecord};
use recommender::{
    aggregate_profiles, analyze_bar, find_influential_user, BarEntry, CandidatePrefilter,
    RoomMember,
};
use std::sync::Arc;

fn catalog() -> Arc<Catalog> {
    let records = vec![
        LiquorRecord::new(1, "Tito's").with_category("vodka").with_price(22.0).with_abv(40.0),
        LiquorRecord::new(2, "Buffalo Trace").with_category("whiskey").with_price(30.0).with_abv(45.0),
        LiquorRecord::new(3, "Hendrick's").with_category("gin").with_price(38.0).with_abv(44.0),
        LiquorRecord::new(4, "Elijah Craig").with_category("whiskey").with_price(35.0).with_abv(47.0),
        LiquorRecord::new(5, "Pappy 23").with_category("whiskey").with_price(4000.0).with_abv(47.8),
    ];
    Arc::new(Catalog::from_records(records).unwrap())
}

fn bar(json: &str) -> Vec<BarEntry> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_bar_json_to_candidates() {
    let bar = bar(
        r#"[
            {"product": {"name": "Knob Creek", "brand": "Jim Beam", "spirit": "Whiskey", "proof": 100, "average_msrp": 40}},
            {"product": {"name": "Wild Turkey 101", "brand": "Campari", "spirit": "Whiskey", "proof": 101, "average_msrp": 25}}
        ]"#,
    );
    let profile = analyze_bar(&bar);
    assert_eq!(profile.favorite_spirit(), "Whiskey");

    let candidates = CandidatePrefilter::new(catalog()).get_candidates(&profile);
    let ids: Vec<u64> = candidates.iter().map(|c| c.record_id).collect();
    // Elijah Craig hits all three; Pappy is too pricey; Buffalo Trace is 5.25 off
    assert_eq!(ids, vec![4, 5, 2, 1, 3]);
}

#[test]
fn test_room_attribution() {
    let whiskey = analyze_bar(&bar(
        r#"[{"product": {"name": "A", "brand": "B", "spirit": "whiskey", "proof": 94, "average_msrp": 30}}]"#,
    ));
    let gin = analyze_bar(&bar(
        r#"[{"product": {"name": "C", "brand": "D", "spirit": "gin", "proof": 88, "average_msrp": 35}}]"#,
    ));

    let room = aggregate_profiles(&[whiskey.clone(), gin.clone()]).unwrap();
    assert_eq!(room.favorite_spirit(), "whiskey");

    let members = vec![
        RoomMember { username: "ana".into(), profile: whiskey },
        RoomMember { username: "ben".into(), profile: gin },
    ];
    let catalog = catalog();
    let hendricks = catalog.get(3).unwrap();
    assert_eq!(find_influential_user(hendricks, &members), Some("ben"));
}
