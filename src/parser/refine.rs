//! 分类之后的细化：居中、场景编号、双对白

use crate::models::{Conf, Element, ElementType};
use crate::utils::fountain_constants::ELEMENT_REGEX;

/// 按原顺序细化元素，返回新的元素列表
pub fn refine(elements: Vec<Element>, conf: &Conf) -> Vec<Element> {
    let elements: Vec<Element> = elements
        .into_iter()
        .map(center)
        .map(|e| if conf.scene_numbers { extract_scene_number(e) } else { e })
        .collect();

    if conf.use_dual_dialogue {
        link_dual_dialogue(&elements)
    } else {
        elements
    }
}

// `>文本<` 居中
fn center(mut element: Element) -> Element {
    let inner = ELEMENT_REGEX["centered"]
        .captures(&element.text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    if let Some(inner) = inner.filter(|t| !t.is_empty()) {
        element.is_centered = true;
        element.text = inner;
    }
    element
}

// 场景标题中第一个 `#编号#`
fn extract_scene_number(mut element: Element) -> Element {
    if element.element_type != ElementType::SceneHeading {
        return element;
    }

    let found = ELEMENT_REGEX["scene_number"]
        .captures(&element.text)
        .and_then(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())));

    if let Some((range, number)) = found {
        element.text.replace_range(range, "");
        element.text = element.text.trim().to_string();
        element.scene_number = Some(number);
    }
    element
}

fn is_dialogue_body(element: &Element) -> bool {
    matches!(element.element_type, ElementType::Dialogue | ElementType::Parenthetical)
}

/// 双对白关联
///
/// 下标大于1、以 `^` 结尾的角色是触发者；从它前一个元素起向前越过连续的对白和括号注释，
/// 遇到的角色就是搭档。向前找不到时，越过触发者自己的对白，紧随其后的角色作为搭档。
/// 判断基于原始文本，不会因为前面的标记而改变。
pub fn link_dual_dialogue(elements: &[Element]) -> Vec<Element> {
    let count = elements.len();
    let mut triggers = vec![false; count];
    let mut partners = vec![false; count];

    for (i, element) in elements.iter().enumerate() {
        if i <= 1 || element.element_type != ElementType::Character || !ELEMENT_REGEX["dual_dialogue"].is_match(&element.text) {
            continue;
        }
        triggers[i] = true;

        let mut linked = false;
        let mut j = i;
        while j > 0 {
            j -= 1;
            let previous = &elements[j];
            if previous.element_type == ElementType::Character {
                partners[j] = true;
                linked = true;
                break;
            }
            if !is_dialogue_body(previous) {
                break;
            }
        }

        if !linked {
            let mut k = i + 1;
            while k < count && is_dialogue_body(&elements[k]) {
                k += 1;
            }
            if k < count && elements[k].element_type == ElementType::Character {
                partners[k] = true;
            }
        }
    }

    elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            let mut element = element.clone();
            if triggers[i] {
                element.is_dual_dialogue = true;
                element.text = ELEMENT_REGEX["dual_dialogue"].replace(&element.text, "").trim().to_string();
            } else if partners[i] {
                element.is_dual_dialogue = true;
                element.text = element.text.replace('^', "").trim().to_string();
            }
            element
        })
        .collect()
}
