use super::*;

#[test]
fn empty_database_is_a_render_error() {
    let db = fontdb::Database::new();
    let err = MemeFont::from_database(&db).unwrap_err();
    assert!(matches!(err, MemeError::Render(_)));
}

#[test]
fn missing_font_file_is_a_render_error() {
    let err = MemeFont::resolve(&FontSource::File(PathBuf::from(
        "definitely/not/here/impact.ttf",
    )))
    .unwrap_err();
    assert!(err.to_string().contains("read font"));
}

#[test]
fn in_memory_bytes_pass_through() {
    let bytes = Arc::new(vec![0u8, 1, 2, 3]);
    let font = MemeFont::resolve(&FontSource::Bytes(bytes.clone())).unwrap();
    assert!(Arc::ptr_eq(&font.bytes, &bytes));
    assert_eq!(font.index, 0);
}

#[test]
fn font_stack_matches_family_chain() {
    for family in CAPTION_FAMILIES {
        assert!(CAPTION_FONT_STACK.contains(family));
    }
    assert!(CAPTION_FONT_STACK.ends_with("sans-serif"));
}

fn face_bytes(db: &fontdb::Database, id: fontdb::ID) -> Option<Vec<u8>> {
    db.with_face_data(id, |data, _| data.to_vec())
}

/// First system font file holding exactly one face that matches `accept`.
fn single_face_file(accept: impl Fn(&fontdb::FaceInfo) -> bool) -> Option<Vec<u8>> {
    let mut system = fontdb::Database::new();
    system.load_system_fonts();
    system
        .faces()
        .filter(|face| face.index == 0 && accept(face))
        .filter_map(|face| face_bytes(&system, face.id))
        .find(|bytes| {
            let mut one = fontdb::Database::new();
            one.load_font_data(bytes.clone());
            one.len() == 1
        })
}

fn first_family(face: &fontdb::FaceInfo) -> String {
    face.families
        .first()
        .map(|(name, _)| name.to_ascii_lowercase())
        .unwrap_or_default()
}

fn is_chain_family(face: &fontdb::FaceInfo) -> bool {
    face.families.iter().any(|(name, _)| {
        CAPTION_FAMILIES
            .iter()
            .chain(SANS_FALLBACK_FAMILIES.iter())
            .any(|f| f.eq_ignore_ascii_case(name))
    })
}

fn bold_upright_sans(face: &fontdb::FaceInfo) -> bool {
    face.weight == fontdb::Weight::BOLD
        && face.style == fontdb::Style::Normal
        && !face.monospaced
        && first_family(face).contains("sans")
}

/// Weight and family of the face `font` points at.
fn chosen_face(font: &MemeFont) -> (u16, String) {
    let mut db = fontdb::Database::new();
    db.load_font_data(font.bytes.to_vec());
    let face = db
        .faces()
        .find(|face| face.index == font.index)
        .expect("chosen face is in its own bytes");
    (face.weight.0, first_family(face))
}

#[test]
fn chain_lists_common_sans_families_before_generic() {
    for family in ["DejaVu Sans", "Liberation Sans", "FreeSans", "Noto Sans"] {
        assert!(SANS_FALLBACK_FAMILIES.contains(&family), "{family}");
    }
}

#[test]
fn single_bold_sans_file_resolves_to_bold() {
    let Some(bytes) = single_face_file(bold_upright_sans) else {
        eprintln!("skipping: no single-face bold sans font installed");
        return;
    };
    let mut db = fontdb::Database::new();
    db.load_font_data(bytes);

    let font = MemeFont::from_database(&db).unwrap();
    assert_eq!(font.index, 0);
    assert_eq!(chosen_face(&font).0, 700);
}

#[test]
fn regular_non_sans_face_loses_to_bold_sans() {
    let Some(sans) = single_face_file(bold_upright_sans) else {
        eprintln!("skipping: no single-face bold sans font installed");
        return;
    };
    let Some(other) = single_face_file(|face| {
        face.weight == fontdb::Weight::NORMAL
            && !first_family(face).contains("sans")
            && !is_chain_family(face)
    }) else {
        eprintln!("skipping: no single-face regular non-sans font installed");
        return;
    };

    // The regular face is loaded first, so it would be the database's first face.
    let mut db = fontdb::Database::new();
    db.load_font_data(other);
    db.load_font_data(sans);

    let font = MemeFont::from_database(&db).unwrap();
    let (weight, family) = chosen_face(&font);
    assert_eq!(weight, 700);
    assert!(family.contains("sans"), "{family}");
}
