use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "famtree_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn pixel(img: &PreparedImage, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * img.width + x) * 4) as usize;
    let d = &img.rgba8_premul;
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

#[test]
fn kinds_parse_from_either_separator() {
    assert_eq!(
        "vintage_scroll".parse::<BackgroundKind>().unwrap(),
        BackgroundKind::VintageScroll
    );
    assert_eq!(
        "Classic-Paper".parse::<BackgroundKind>().unwrap(),
        BackgroundKind::ClassicPaper
    );
    assert!("marble".parse::<BackgroundKind>().is_err());
    for kind in BackgroundKind::ALL {
        assert_eq!(kind.as_str().parse::<BackgroundKind>().unwrap(), kind);
    }
}

#[test]
fn classic_paper_is_a_flat_off_white() {
    let img = synthesize(BackgroundKind::ClassicPaper, 16, 12, 0).unwrap();
    assert_eq!((img.width, img.height), (16, 12));
    assert_eq!(pixel(&img, 0, 0), [0xfa, 0xf8, 0xf3, 255]);
    assert_eq!(pixel(&img, 15, 11), [0xfa, 0xf8, 0xf3, 255]);
}

#[test]
fn vintage_scroll_is_seeded_and_framed() {
    let a = synthesize(BackgroundKind::VintageScroll, 300, 200, 7).unwrap();
    let b = synthesize(BackgroundKind::VintageScroll, 300, 200, 7).unwrap();
    assert_eq!(a, b);

    let svg_a = background_svg(BackgroundKind::VintageScroll, 300, 200, 7);
    let svg_c = background_svg(BackgroundKind::VintageScroll, 300, 200, 8);
    assert_ne!(svg_a, svg_c);
    assert_eq!(svg_a.matches("<circle").count(), 200);
    assert_eq!(svg_a.matches("<polygon").count(), 4);

    // Outer border is saddle brown; the middle is parchment-ish and opaque.
    assert_eq!(pixel(&a, 5, 100), [0x8b, 0x45, 0x13, 255]);
    assert_eq!(pixel(&a, 150, 100)[3], 255);
}

#[test]
fn library_lists_supported_files_sorted_and_resolves() {
    let root = temp_dir("bg_library");
    let lib = BackgroundLibrary::new(&root);
    assert!(lib.list().unwrap().is_empty());

    std::fs::create_dir_all(lib.backgrounds_dir()).unwrap();
    for name in ["b.PNG", "a.jpg", "notes.txt", "c.tiff"] {
        std::fs::write(lib.backgrounds_dir().join(name), b"x").unwrap();
    }
    assert_eq!(lib.list().unwrap(), vec!["a.jpg", "b.PNG", "c.tiff"]);

    assert_eq!(lib.resolve("a.jpg"), Some(lib.backgrounds_dir().join("a.jpg")));
    assert_eq!(lib.resolve("missing.png"), None);

    let direct = root.join("elsewhere.png");
    std::fs::write(&direct, b"x").unwrap();
    assert_eq!(lib.resolve(direct.to_str().unwrap()), Some(direct));

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn create_writes_a_loadable_png() {
    let root = temp_dir("bg_create");
    let lib = BackgroundLibrary::new(&root);
    let path = lib.create(BackgroundKind::ClassicPaper, 40, 30, 1).unwrap();
    assert!(path.ends_with("backgrounds/classic_paper.png"));
    assert_eq!(lib.list().unwrap(), vec!["classic_paper.png"]);

    let img = load_background(&path).unwrap();
    assert_eq!((img.width, img.height), (40, 30));
    assert_eq!(pixel(&img, 3, 3), [0xfa, 0xf8, 0xf3, 255]);

    std::fs::remove_dir_all(&root).unwrap();
}
