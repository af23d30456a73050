use fountain_script::{parse, serialize, Actor, Line, Scene, Script};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

// 场景结构：场景名 + (说话人, 文本) 列表
fn structure(script: &Script) -> Vec<(String, Vec<(String, String)>)> {
    script
        .scenes
        .iter()
        .map(|scene| {
            let lines = scene
                .lines
                .iter()
                .map(|l| (l.actor.name.clone(), l.text.clone()))
                .collect();
            (scene.name.clone(), lines)
        })
        .collect()
}

fn sample_script() -> Script {
    let mut script = Script::new("Two Rooms");
    script.author = Some("A. Writer".to_string());
    script.draft_date = Some("2026-05-04".to_string());

    let mut kitchen = Scene::new("INT. KITCHEN - NIGHT");
    kitchen.add_line(Line::new(Actor::new("NORA"), "Did you hear that?"));
    kitchen.add_line(Line::new(Actor::new("SAM"), "Hear what?\nI was asleep."));
    script.add_scene(kitchen);

    let mut yard = Scene::new("EXT. BACKYARD - CONTINUOUS");
    yard.add_line(Line::new(Actor::new("NORA"), "Over there."));
    script.add_scene(yard);

    script
}

#[test]
fn test_serialize_layout() {
    let text = serialize(&sample_script());
    let expected = "Title: Two Rooms\n\
                    Author: A. Writer\n\
                    Draft date: 2026-05-04\n\
                    \n\
                    INT. KITCHEN - NIGHT\n\
                    \n\
                    NORA\n\
                    Did you hear that?\n\
                    \n\
                    SAM\n\
                    Hear what?\nI was asleep.\n\
                    \n\
                    EXT. BACKYARD - CONTINUOUS\n\
                    \n\
                    NORA\n\
                    Over there.\n\
                    \n";
    assert_eq!(text, expected);
}

#[test]
fn test_round_trip_keeps_scene_structure() {
    let original = sample_script();
    let reparsed = Script::from_document(&parse(&serialize(&original)));

    assert_eq!(reparsed.title, original.title, "标题应保留");
    assert_eq!(reparsed.author, original.author, "作者应保留");
    assert_eq!(structure(&reparsed), structure(&original), "场景与台词结构应保留");
}

#[test]
fn test_round_trip_from_sample_file() {
    let script_path = Path::new("tests/test_data/night_bus.fountain");
    let text = fs::read_to_string(script_path).expect("无法读取测试文件");

    let script = Script::from_document(&parse(&text));
    let again = Script::from_document(&parse(&serialize(&script)));

    // 只比较场景名和说话人
    let speakers = |s: &Script| -> Vec<Vec<String>> {
        s.scenes
            .iter()
            .map(|scene| scene.lines.iter().map(|l| l.actor.name.clone()).collect())
            .collect()
    };
    let names = |s: &Script| -> Vec<String> { s.scenes.iter().map(|scene| scene.name.clone()).collect() };

    assert_eq!(names(&again), names(&script));
    assert_eq!(speakers(&again), speakers(&script));
}

#[test]
fn test_serialization_is_lossy() {
    let text = "INT. HOUSE\n\n[[a note]]\n\n= synopsis\n\nBOB\nHi.\n";
    let output = serialize(&Script::from_document(&parse(text)));
    assert_eq!(output, "INT. HOUSE\n\nBOB\nHi.\n\n", "注释与概要不会写回");
}

#[test]
fn test_round_trip_with_content_before_first_heading() {
    let text = "\n\nBOB\nHi.\n\nINT. HOUSE\n\nALICE\nHey.\n";
    let script = Script::from_document(&parse(text));
    let again = Script::from_document(&parse(&serialize(&script)));

    assert_eq!(structure(&script), vec![
        ("".to_string(), vec![("BOB".to_string(), "Hi.".to_string())]),
        ("INT. HOUSE".to_string(), vec![("ALICE".to_string(), "Hey.".to_string())]),
    ]);
    assert_eq!(structure(&again), structure(&script), "无名场景的第一句台词不能变成动作");
}
