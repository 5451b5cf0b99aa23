use std::fs;
use std::path::Path;

use poem_pages::PoemLibrary;
use poem_pages_cli::{
    build_master_catalog, save_master_catalog, BatchGenerator, GeneratorSettings, LengthRange,
    MASTER_CATALOG_FILE,
};

fn write_corpus(root: &Path) {
    let tang = root.join("唐诗");
    fs::create_dir_all(&tang).unwrap();
    fs::write(
        tang.join("poet.tang.0.json"),
        r#"[
            {"title": "静夜思", "author": "李白", "paragraphs": ["床前明月光，疑是地上霜。", "举头望明月，低头思故乡。"]},
            {"title": "春晓", "author": "孟浩然", "paragraphs": ["春眠不觉晓，处处闻啼鸟。", "夜来风雨声，花落知多少。"]},
            {"title": "登鹳雀楼", "author": "王之涣", "paragraphs": ["白日依山尽，黄河入海流。", "欲穷千里目，更上一层楼。"]}
        ]"#,
    )
    .unwrap();

    let song = root.join("宋词");
    fs::create_dir_all(&song).unwrap();
    fs::write(
        song.join("ci.json"),
        r#"{"title": "如梦令 昨夜雨疏风骤", "author": "李清照", "paragraphs": ["昨夜雨疏风骤，浓睡不消残酒。"]}"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("empty_ascii_dir")).unwrap();
}

fn settings(root: &Path, per_file: usize) -> GeneratorSettings {
    GeneratorSettings {
        lines_per_page: 12,
        columns_per_page: 14,
        length_range: LengthRange { min: 1, max: 1000 },
        input_dir: root.join("in"),
        output_dir: root.join("out"),
        poems_per_file: per_file,
        ..GeneratorSettings::default()
    }
}

#[test]
fn generates_sharded_files_indexes_and_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(&tmp.path().join("in"));
    let settings = settings(tmp.path(), 1);

    let library = PoemLibrary::load(&settings.input_dir, &settings.parse_options()).unwrap();
    assert_eq!(library.category_count(), 2);

    let report = BatchGenerator::new(&settings)
        .unwrap()
        .generate_all(&library)
        .unwrap();
    assert_eq!(report.poems_written, 4);
    assert_eq!(report.files_written, 4);
    assert_eq!(report.failures, 0);
    assert_eq!(report.mapping["唐诗"]["春晓"], "0002_春晓.txt");
    assert_eq!(
        report.mapping["宋词"]["如梦令・昨夜雨疏风骤"],
        "0001_如梦令・昨夜雨疏风骤.txt"
    );

    let out = &settings.output_dir;
    let first = fs::read_to_string(out.join("唐诗/001-100/0001_静夜思.txt")).unwrap();
    let rows: Vec<&str> = first.lines().collect();
    assert_eq!(rows.len(), 12);
    assert!(rows[0].starts_with('╔') && rows[0].contains("静夜思"));
    assert!(rows[1].contains("「李白」"));
    assert!(rows[11].contains("第１／１页"));
    assert!(first.contains("床前明月光，"));

    let index = fs::read_to_string(out.join("唐诗/目录001-003.txt")).unwrap();
    assert!(index.contains("【唐诗】"));
    assert!(index.contains("００２・春晓"));
    assert!(index.contains("「孟浩然」"));

    let catalog = build_master_catalog(&library, &settings);
    let path = save_master_catalog(&catalog, out).unwrap();
    assert_eq!(path, out.join(MASTER_CATALOG_FILE));
    let catalog = fs::read_to_string(path).unwrap();
    assert!(catalog.contains("１・唐诗「３首」"));
    assert!(catalog.contains("２・宋词「１首」"));
}

#[test]
fn batch_mode_joins_poems_and_previews_next_title() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(&tmp.path().join("in"));
    let settings = settings(tmp.path(), 2);

    let library = PoemLibrary::load(&settings.input_dir, &settings.parse_options()).unwrap();
    let report = BatchGenerator::new(&settings)
        .unwrap()
        .generate_all(&library)
        .unwrap();
    assert_eq!(report.poems_written, 4);
    assert_eq!(report.files_written, 3);
    assert_eq!(report.mapping["唐诗"]["静夜思"], "0001-0002_合集.txt");
    assert_eq!(report.mapping["唐诗"]["登鹳雀楼"], "0003-0003_合集.txt");

    let out = &settings.output_dir;
    let batch = fs::read_to_string(out.join("唐诗/001-100/0001-0002_合集.txt")).unwrap();
    let rows: Vec<&str> = batch.lines().collect();
    assert_eq!(rows.len(), 24);
    assert!(rows[11].starts_with('╚') && rows[11].contains("▶春晓"));
    assert!(rows[23].contains("第１／１页"));

    let index = fs::read_to_string(out.join("唐诗/目录001-003.txt")).unwrap();
    assert!(index.contains("━０００１～０００２━"));
}

#[test]
fn length_filter_drops_short_poems() {
    let tmp = tempfile::tempdir().unwrap();
    write_corpus(&tmp.path().join("in"));
    let settings = GeneratorSettings {
        length_range: LengthRange { min: 20, max: 1000 },
        ..settings(tmp.path(), 1)
    };
    let library = PoemLibrary::load(&settings.input_dir, &settings.parse_options()).unwrap();
    assert_eq!(library.get("唐诗").map(<[_]>::len), Some(3));
    assert_eq!(library.get("宋词").map(<[_]>::len), Some(0));

    let report = BatchGenerator::new(&settings)
        .unwrap()
        .generate_all(&library)
        .unwrap();
    assert!(!report.mapping.contains_key("宋词"));
    assert!(!settings.output_dir.join("宋词").exists());
}
