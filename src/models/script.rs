use serde::{Deserialize, Serialize};
use crate::models::conf::Conf;
use crate::models::document::Document;
use crate::models::element::ElementType;
use crate::parser::text_processor::{to_html, trim_character_extension};
use crate::utils::FountainConstants;

/// 角色
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
}

impl Actor {
    pub const ACTION_NAME: &'static str = FountainConstants::ACTION_NAME;

    pub fn new(name: impl Into<String>) -> Self {
        Actor { name: name.into() }
    }

    /// 动作行的占位角色
    pub fn action() -> Self {
        Actor::new(Self::ACTION_NAME)
    }
}

/// 台词行：说话角色 + 文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub actor: Actor,
    pub text: String,
}

impl Line {
    pub fn new(actor: Actor, text: impl Into<String>) -> Self {
        Line { actor, text: text.into() }
    }

    pub fn is_action(&self) -> bool {
        self.actor.name.eq_ignore_ascii_case(Actor::ACTION_NAME)
    }

    /// 展示用HTML（粗体、斜体、下划线、换行）
    pub fn html(&self) -> String {
        to_html(&self.text)
    }
}

/// 场景
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub number: usize,
    pub lines: Vec<Line>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Scene { name: name.into(), number: 0, lines: Vec::new() }
    }

    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn add_action(&mut self, text: impl Into<String>) {
        self.lines.push(Line::new(Actor::action(), text));
    }
}

/// 宿主剧本模型
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub title: Option<String>,
    pub credit: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub draft_date: Option<String>,
    pub contact: Option<String>,
    pub actors: Vec<Actor>,
    pub scenes: Vec<Scene>,
}

impl Script {
    pub fn new(title: impl Into<String>) -> Self {
        Script {
            title: Some(title.into()),
            actors: vec![Actor::action()],
            ..Default::default()
        }
    }

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn has_actor(&self, actor: &Actor) -> bool {
        self.actors.contains(actor)
    }

    /// 添加场景，场景编号按顺序递增
    pub fn add_scene(&mut self, mut scene: Scene) {
        scene.number = self.scenes.len();
        self.scenes.push(scene);
    }

    /// 由解析结果构建剧本模型（使用默认配置）
    pub fn from_document(document: &Document) -> Self {
        Self::from_document_with(document, &Conf::default())
    }

    /// 由解析结果构建剧本模型
    ///
    /// 每个场景标题开启新场景，标题之前的内容归入一个无名场景；
    /// 角色及其后连续的对白/括号注释合并为一行台词；动作成为占位角色的台词；
    /// 其余元素（转场、注释、概要、章节、分页）不进入模型。
    pub fn from_document_with(document: &Document, conf: &Conf) -> Self {
        let page = &document.title_page;
        let mut script = Script {
            title: page.value("title"),
            credit: page.value("credit"),
            author: page.value("authors"),
            source: page.value("source"),
            draft_date: page.value("draft date"),
            contact: page.value("contact"),
            actors: vec![Actor::new(conf.action_name.as_str())],
            scenes: Vec::new(),
        };

        let mut speaker: Option<Actor> = None;
        let mut speech: Vec<String> = Vec::new();

        for element in &document.elements {
            match element.element_type {
                ElementType::Dialogue | ElementType::Parenthetical => {
                    if speaker.is_some() {
                        speech.push(element.text.clone());
                    }
                    continue;
                }
                _ => script.flush_speech(&mut speaker, &mut speech),
            }

            match element.element_type {
                ElementType::SceneHeading => script.add_scene(Scene::new(element.text.as_str())),
                ElementType::Character => {
                    let actor = Actor::new(trim_character_extension(&element.text));
                    if !script.has_actor(&actor) {
                        script.add_actor(actor.clone());
                    }
                    speaker = Some(actor);
                }
                ElementType::Action => {
                    let action = Line::new(Actor::new(conf.action_name.as_str()), element.text.as_str());
                    script.current_scene().add_line(action);
                }
                _ => {}
            }
        }
        script.flush_speech(&mut speaker, &mut speech);

        script
    }

    // 当前场景，没有则创建无名场景
    fn current_scene(&mut self) -> &mut Scene {
        if self.scenes.is_empty() {
            self.add_scene(Scene::new(""));
        }
        let last = self.scenes.len() - 1;
        &mut self.scenes[last]
    }

    fn flush_speech(&mut self, speaker: &mut Option<Actor>, speech: &mut Vec<String>) {
        if let Some(actor) = speaker.take() {
            if !speech.is_empty() {
                let text = speech.join("\n");
                self.current_scene().add_line(Line::new(actor, text));
            }
        }
        speech.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::element::Element;
    use crate::models::title_page::TitlePage;

    fn element(element_type: ElementType, text: &str) -> Element {
        Element::new(element_type, text)
    }

    #[test]
    fn scenes_are_numbered_in_order() {
        let mut script = Script::new("Test");
        script.add_scene(Scene::new("INT. A"));
        script.add_scene(Scene::new("EXT. B"));
        assert_eq!(script.scenes[0].number, 0);
        assert_eq!(script.scenes[1].number, 1);
    }

    #[test]
    fn new_script_contains_action_actor() {
        let script = Script::new("Test");
        assert!(script.has_actor(&Actor::action()));
    }

    #[test]
    fn builder_groups_cues_into_lines() {
        let mut page = TitlePage::new();
        page.insert("title", vec!["Brick & Steel".to_string()]);
        page.insert("author", vec!["Stu Maschwitz".to_string()]);
        let document = Document::new(page, vec![
            element(ElementType::SceneHeading, "INT. BASEMENT"),
            element(ElementType::Character, "JASON (V.O.)"),
            element(ElementType::Dialogue, "my name is Jason"),
            element(ElementType::Parenthetical, "(pause)"),
            element(ElementType::Dialogue, "And this is a test"),
            element(ElementType::Action, "Jason whips off his sunglasses"),
            element(ElementType::Transition, "CUT TO:"),
        ]);

        let script = Script::from_document(&document);
        assert_eq!(script.title.as_deref(), Some("Brick & Steel"));
        assert_eq!(script.author.as_deref(), Some("Stu Maschwitz"));
        assert_eq!(script.scenes.len(), 1);

        let lines = &script.scenes[0].lines;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].actor.name, "JASON");
        assert_eq!(lines[0].text, "my name is Jason\n(pause)\nAnd this is a test");
        assert!(lines[1].is_action());
        assert!(script.has_actor(&Actor::new("JASON")));
    }

    #[test]
    fn content_before_first_heading_gets_unnamed_scene() {
        let document = Document::new(TitlePage::new(), vec![
            element(ElementType::Action, "Darkness."),
            element(ElementType::SceneHeading, "EXT. FIELD"),
        ]);
        let script = Script::from_document(&document);
        assert_eq!(script.scenes.len(), 2);
        assert_eq!(script.scenes[0].name, "");
        assert_eq!(script.scenes[1].name, "EXT. FIELD");
    }

    #[test]
    fn cue_without_dialogue_is_dropped() {
        let document = Document::new(TitlePage::new(), vec![
            element(ElementType::SceneHeading, "INT. ROOM"),
            element(ElementType::Character, "BOB"),
            element(ElementType::SceneHeading, "INT. HALL"),
        ]);
        let script = Script::from_document(&document);
        assert!(script.scenes.iter().all(|s| s.lines.is_empty()));
    }

    #[test]
    fn line_html_renders_emphasis() {
        let line = Line::new(Actor::new("BOB"), "**Stop** *now*\n_please_");
        assert_eq!(line.html(), "<b>Stop</b> <i>now</i><br><u>please</u>");
    }
}
