use super::*;

fn sample_guide() -> Vec<ContentBlock> {
    vec![
        ContentBlock::heading("The Cross"),
        ContentBlock::paragraph("Hold the cube with the white center facing up."),
        ContentBlock::heading("First Layer"),
        ContentBlock::subheading("Inserting corners"),
        ContentBlock::algorithm("R U R' U'"),
    ]
}

#[test]
fn segment_empty_input_has_no_stages() {
    assert!(segment(&[]).is_empty());
}

#[test]
fn segment_without_heading_is_introduction() {
    let blocks = vec![
        ContentBlock::paragraph("Welcome."),
        ContentBlock::paragraph("Grab your cube."),
    ];
    let stages = segment(&blocks);

    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0].title, INTRODUCTION_TITLE);
    assert_eq!(stages[0].blocks, blocks);
}

#[test]
fn segment_opens_stage_at_each_heading() {
    let h1 = ContentBlock::heading("H1");
    let p1 = ContentBlock::paragraph("P1");
    let h2 = ContentBlock::heading("H2");
    let p2 = ContentBlock::paragraph("P2");
    let p3 = ContentBlock::algorithm("P3");
    let stages = segment(&[h1.clone(), p1.clone(), h2.clone(), p2.clone(), p3.clone()]);

    assert_eq!(
        stages,
        vec![
            Stage {
                title: "H1".into(),
                blocks: vec![h1, p1],
            },
            Stage {
                title: "H2".into(),
                blocks: vec![h2, p2, p3],
            },
        ]
    );
}

#[test]
fn segment_keeps_leading_blocks_before_first_heading() {
    let blocks = vec![
        ContentBlock::subheading("Notation"),
        ContentBlock::heading("Stage one"),
    ];
    let stages = segment(&blocks);

    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].title, INTRODUCTION_TITLE);
    assert_eq!(stages[0].blocks, vec![ContentBlock::subheading("Notation")]);
    assert_eq!(stages[1].blocks, vec![ContentBlock::heading("Stage one")]);
}

#[test]
fn segment_is_deterministic() {
    let guide = sample_guide();
    assert_eq!(segment(&guide), segment(&guide));
}

#[test]
fn pager_boundaries_are_silent() {
    let mut pager = StagePager::new(segment(&sample_guide()));
    assert_eq!(pager.len(), 2);

    assert!(!pager.previous());
    assert_eq!(pager.current_index(), 0);

    assert!(pager.next());
    assert_eq!(pager.current().map(|s| s.title.as_str()), Some("First Layer"));

    assert!(!pager.next());
    assert_eq!(pager.current_index(), 1);
    assert!(!pager.has_next());
    assert!(pager.has_previous());

    pager.reset();
    assert_eq!(pager.current_index(), 0);
}

#[test]
fn pager_without_stages_has_no_current() {
    let mut pager = StagePager::default();
    assert!(pager.current().is_none());
    assert!(pager.position().is_none());
    assert!(!pager.next());
    assert!(!pager.previous());
}

#[test]
fn pager_reports_one_based_position() {
    let mut pager = StagePager::new(segment(&sample_guide()));
    pager.next();
    assert_eq!(pager.position(), Some(StagePosition { number: 2, total: 2 }));
}

#[test]
fn test_method_selection() {
    assert!(matches!(LearningMethod::select_method(0), Ok(LearningMethod::Beginner)));
    assert!(matches!(LearningMethod::select_method(1), Ok(LearningMethod::Cfop)));
    assert!(matches!(LearningMethod::select_method(2), Ok(LearningMethod::Roux)));
    assert!(LearningMethod::select_method(3).is_err());
}

#[test]
fn test_difficulty_selection() {
    assert!(matches!(Difficulty::select_difficulty(0), Ok(Difficulty::Simple)));
    assert!(matches!(Difficulty::select_difficulty(1), Ok(Difficulty::Advanced)));
    assert!(Difficulty::select_difficulty(2).is_err());
}

#[test]
fn method_parses_short_name_and_label() {
    assert_eq!("cfop".parse::<LearningMethod>(), Ok(LearningMethod::Cfop));
    assert_eq!("Roux Method".parse::<LearningMethod>(), Ok(LearningMethod::Roux));
    assert_eq!("advanced".parse::<Difficulty>(), Ok(Difficulty::Advanced));
    assert!("Petrus".parse::<LearningMethod>().is_err());
    assert_eq!(LearningMethod::Cfop.to_string(), "CFOP (Fridrich method)");
}

#[test]
fn selector_accepts_index_or_name() {
    let by_index: Selector = serde_json::from_str("1").unwrap();
    let by_name: Selector = serde_json::from_str(r#""roux""#).unwrap();
    assert_eq!(by_index, Selector::Index(1));
    assert_eq!(LearningMethod::from_selector(&by_index), Ok(LearningMethod::Cfop));
    assert_eq!(LearningMethod::from_selector(&by_name), Ok(LearningMethod::Roux));
    assert_eq!(
        Difficulty::from_selector(&Selector::Name("Advanced".into())),
        Ok(Difficulty::Advanced)
    );
    assert!(Difficulty::from_selector(&Selector::Index(7)).is_err());
}
