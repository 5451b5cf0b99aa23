use std::fs;
use std::path::{Path, PathBuf};

pub const TANG_FIXTURE: &str = r#"[
    {"title": "静夜思", "author": "李白", "paragraphs": ["床前明月光，疑是地上霜。", "举头望明月，低头思故乡。"]},
    {"title": "春江花月夜", "author": "张若虚", "paragraphs": [
        "春江潮水连海平，海上明月共潮生。", "滟滟随波千万里，何处春江无月明！",
        "江流宛转绕芳甸，月照花林皆似霰。", "空里流霜不觉飞，汀上白沙看不见。",
        "江天一色无纤尘，皎皎空中孤月轮。", "江畔何人初见月？江月何年初照人？"
    ]},
    {"title": "无内容", "author": "某", "paragraphs": ["", ""]}
]"#;

pub const SONG_FIXTURE: &str = r#"{"title": "水调歌头 明月几时有", "author": "苏轼",
    "paragraphs": ["明月几时有？把酒问青天。不知天上宫阙，今夕是何年。"]}"#;

/// Write a small two-category corpus plus noise that loaders must skip.
pub fn write_corpus(root: &Path) -> PathBuf {
    let tang = root.join("唐诗");
    let song = root.join("宋词");
    fs::create_dir_all(&tang).unwrap();
    fs::create_dir_all(&song).unwrap();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(tang.join("tang.0.json"), TANG_FIXTURE).unwrap();
    fs::write(tang.join("broken.json"), "{ not json").unwrap();
    fs::write(tang.join("notes.txt"), "ignored").unwrap();
    fs::write(song.join("ci.json"), SONG_FIXTURE).unwrap();
    root.to_path_buf()
}

/// Page geometries covering narrow, default, and undecorated layouts.
pub fn geometries() -> Vec<(usize, usize, bool)> {
    let mut out = Vec::new();
    for columns in [3, 4, 7, 12, 30] {
        for lines in [4, 5, 9, 20] {
            out.push((columns, lines, true));
            out.push((columns, lines, false));
        }
    }
    out
}
