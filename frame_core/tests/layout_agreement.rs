//! The member generator and the cut extractor must describe the same wall.

use frame_core::cuts::CutCategory;
use frame_core::lumber::{HeaderPly, LumberSize, StudSpacing};
use frame_core::members::member_counts;
use frame_core::optimizer::pack;
use frame_core::{
    extract_cuts_with, generate_members, EstimateSettings, FramingMember, MemberKind, Opening, WallSpec,
};

fn busy_wall() -> WallSpec {
    let mut wall = WallSpec::new(288.0, 109.125)
        .with_opening(Opening::window(36.0, 48.0).with_quantity(2).with_drop(4.0))
        .with_opening(Opening::door(36.0, 80.0).centered_at(240.0))
        .with_opening(
            Opening::window(60.0, 36.0)
                .with_header(LumberSize::L2x12, HeaderPly::Triple)
                .with_studs(2, 2)
                .centered_at(60.0),
        );
    wall.stud_size = LumberSize::L2x6;
    wall.stud_spacing = StudSpacing::Oc24;
    wall.blocking_rows = 2;
    wall.pt_bottom_plate = true;
    wall.start_stud_count = 2;
    wall.end_stud_count = 3;
    wall
}

/// No precuts, so every member turns into an optimizer cut.
fn no_precut_settings() -> EstimateSettings {
    EstimateSettings {
        precut_lengths_in: Vec::new(),
        ..EstimateSettings::default()
    }
}

fn sorted(mut lengths: Vec<f64>) -> Vec<i64> {
    lengths.sort_by(|a, b| a.total_cmp(b));
    lengths.into_iter().map(|l| (l * 100.0).round() as i64).collect()
}

fn member_lengths(members: &[FramingMember], kinds: &[MemberKind]) -> Vec<f64> {
    members
        .iter()
        .filter(|m| kinds.contains(&m.kind))
        .map(|m| m.length())
        .collect()
}

#[test]
fn cuts_match_members_per_category() {
    let wall = busy_wall();
    let members = generate_members(&wall);
    let groups = extract_cuts_with(&wall, &no_precut_settings()).groups();

    let cut = |category: CutCategory, size: LumberSize| groups.get(&(category, size)).cloned().unwrap_or_default();

    assert_eq!(
        sorted(cut(CutCategory::Stud, LumberSize::L2x6)),
        sorted(member_lengths(
            &members,
            &[MemberKind::Stud, MemberKind::KingJack, MemberKind::Cripple]
        ))
    );
    assert_eq!(
        sorted(cut(CutCategory::Blocking, LumberSize::L2x6)),
        sorted(member_lengths(&members, &[MemberKind::Blocking]))
    );
    assert_eq!(
        sorted(cut(CutCategory::Plate, LumberSize::L2x6)),
        sorted(member_lengths(&members, &[MemberKind::Plate, MemberKind::Sill]))
    );
    assert_eq!(
        sorted(cut(CutCategory::PtPlate, LumberSize::L2x6)),
        sorted(member_lengths(&members, &[MemberKind::PtPlate]))
    );

    let mut headers = cut(CutCategory::Header, LumberSize::L2x10);
    headers.extend(cut(CutCategory::Header, LumberSize::L2x12));
    assert_eq!(sorted(headers), sorted(member_lengths(&members, &[MemberKind::Header])));
}

#[test]
fn precut_and_bins_cover_stud_footage() {
    let wall = WallSpec::new(192.0, 97.125).with_opening(Opening::window(36.0, 48.0));
    let settings = EstimateSettings::default();
    let members = generate_members(&wall);
    let cuts = extract_cuts_with(&wall, &settings);

    let stud_footage: f64 = member_lengths(
        &members,
        &[MemberKind::Stud, MemberKind::KingJack, MemberKind::Cripple],
    )
    .iter()
    .sum();

    let precut_footage: f64 = cuts.precuts.iter().map(|p| p.length * p.count as f64).sum();
    let stud_cuts = cuts.groups()[&(CutCategory::Stud, LumberSize::L2x4)].clone();
    let cut_footage: f64 = stud_cuts.iter().sum();
    assert!((precut_footage + cut_footage - stud_footage).abs() < 1e-6);

    // 12 full-height studs plus jacks and cripples
    let expected = 12.0 * 92.625 + 2.0 * 83.375 + 3.0 * 33.875;
    assert!((stud_footage - expected).abs() < 1e-6);

    let bins = pack(&stud_cuts, &settings.stud_stock_in);
    let bought: f64 = bins.iter().map(|b| b.stock_length).sum();
    let used: f64 = bins.iter().map(|b| b.stock_length - b.waste()).sum();
    assert!((used - cut_footage).abs() < 1e-6);
    assert!(bought >= cut_footage);
}

#[test]
fn scenario_192_window_wall() {
    let wall = WallSpec::new(192.0, 97.125).with_opening(Opening::window(36.0, 48.0));
    let counts = member_counts(&generate_members(&wall));

    assert_eq!(counts.get(&MemberKind::PtPlate), None);
    assert_eq!(counts[&MemberKind::Plate], 3);
    assert_eq!(counts[&MemberKind::Stud], 10);
    assert_eq!(counts[&MemberKind::KingJack], 4);
    assert_eq!(counts[&MemberKind::Header], 2);
    assert_eq!(counts[&MemberKind::Sill], 1);
    assert_eq!(counts[&MemberKind::Cripple], 3);
    assert_eq!(counts.get(&MemberKind::Blocking), None);
}

#[test]
fn generation_repeats_exactly() {
    let wall = busy_wall();
    let first = generate_members(&wall);
    let second = generate_members(&wall);
    assert_eq!(first.len(), second.len());
    assert_eq!(first, second);

    let mut ids: Vec<&str> = first.iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), first.len());
}
