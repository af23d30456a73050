use log::debug;
use crate::models::{Conf, Scene, Script};
use crate::utils::FountainConstants;

/// 把剧本模型写回 Fountain 文本
///
/// 只输出标题页、场景标题和台词，注释、概要、章节、居中与双对白标记都不会还原。
#[derive(Debug, Clone, Default)]
pub struct FountainSerializer {
    conf: Conf,
}

impl FountainSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(conf: Conf) -> Self {
        FountainSerializer { conf }
    }

    pub fn serialize(&self, script: &Script) -> String {
        let mut out = String::new();

        if self.write_title_page(&mut out, script) {
            out.push('\n');
        }
        for scene in &script.scenes {
            self.write_scene(&mut out, scene);
        }

        debug!("序列化完成: 场景 {} 个, 输出 {} 字节", script.scenes.len(), out.len());
        out
    }

    // 按固定顺序写出标题页，返回是否写出了内容
    fn write_title_page(&self, out: &mut String, script: &Script) -> bool {
        let fields = [
            &script.title,
            &script.credit,
            &script.author,
            &script.source,
            &script.draft_date,
            &script.contact,
        ];

        let mut written = false;
        for (key, value) in FountainConstants::TITLE_DIRECTIVE_ORDER.iter().zip(fields) {
            let value = match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v,
                _ => continue,
            };

            if value.contains('\n') {
                // 多行值写成缩进的续行
                out.push_str(key);
                out.push_str(":\n");
                for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            } else {
                out.push_str(&format!("{}: {}\n", key, value));
            }
            written = true;
        }
        written
    }

    fn write_scene(&self, out: &mut String, scene: &Scene) {
        let heading = scene.name.trim().to_uppercase();
        // 无名场景（第一个场景标题之前的内容）不写标题；
        // 位于文本开头时先空一行，否则正文首行会被当成动作
        if heading.is_empty() && out.is_empty() {
            out.push('\n');
        }
        if !heading.is_empty() {
            if !heading.starts_with("INT.") && !heading.starts_with("EXT.") {
                out.push('.');
            }
            out.push_str(&heading);
            out.push_str("\n\n");
        }

        for line in &scene.lines {
            let speaker = line.actor.name.trim();
            if !speaker.is_empty() && !self.conf.is_action_name(speaker) {
                out.push_str(&speaker.to_uppercase());
                out.push('\n');
            }
            out.push_str(&line.text);
            out.push_str("\n\n");
        }
    }
}

/// 使用默认配置序列化
pub fn serialize(script: &Script) -> String {
    FountainSerializer::new().serialize(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Actor, Line};
    use pretty_assertions::assert_eq;

    #[test]
    fn title_scene_and_lines() {
        let mut script = Script::new("My Play");
        script.author = Some("J. Doe".to_string());
        let mut scene = Scene::new("int. house - day");
        scene.add_line(Line::new(Actor::new("Bob"), "Hello."));
        scene.add_action("He sits.");
        script.add_scene(scene);

        assert_eq!(
            serialize(&script),
            "Title: My Play\nAuthor: J. Doe\n\nINT. HOUSE - DAY\n\nBOB\nHello.\n\nHe sits.\n\n"
        );
    }

    #[test]
    fn non_standard_heading_is_forced() {
        let mut script = Script::default();
        script.add_scene(Scene::new("the void"));
        assert_eq!(serialize(&script), ".THE VOID\n\n");
    }

    #[test]
    fn empty_script_is_empty_text() {
        assert_eq!(serialize(&Script::default()), "");
    }

    #[test]
    fn unnamed_first_scene_starts_with_blank_line() {
        let mut script = Script::default();
        let mut scene = Scene::new("");
        scene.add_line(Line::new(Actor::new("BOB"), "Hi."));
        script.add_scene(scene);
        assert_eq!(serialize(&script), "\nBOB\nHi.\n\n");

        script.title = Some("T".to_string());
        assert_eq!(serialize(&script), "Title: T\n\nBOB\nHi.\n\n");
    }

    #[test]
    fn multi_line_contact_uses_continuations() {
        let script = Script {
            contact: Some("Jane Doe\n555-0100".to_string()),
            ..Script::default()
        };
        assert_eq!(serialize(&script), "Contact:\n    Jane Doe\n    555-0100\n\n");
    }

    #[test]
    fn action_sentinel_is_case_insensitive() {
        let mut script = Script::default();
        let mut scene = Scene::new("INT. HALL");
        scene.add_line(Line::new(Actor::new("action"), "Footsteps."));
        scene.add_line(Line::new(Actor::new(""), "Silence."));
        script.add_scene(scene);
        assert_eq!(serialize(&script), "INT. HALL\n\nFootsteps.\n\nSilence.\n\n");
    }

    #[test]
    fn custom_action_name() {
        let conf = Conf { action_name: "NARRATOR".to_string(), ..Conf::default() };
        let mut script = Script::default();
        let mut scene = Scene::new("EXT. ROAD");
        scene.add_line(Line::new(Actor::new("Narrator"), "Dust."));
        script.add_scene(scene);
        assert_eq!(FountainSerializer::with_config(conf).serialize(&script), "EXT. ROAD\n\nDust.\n\n");
    }
}
