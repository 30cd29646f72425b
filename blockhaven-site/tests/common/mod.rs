#![allow(dead_code)]

use blockhaven_site::{Effect, EventSource, NoticeKind, NoticeView, Subscription, Target};

/// Event source where only the listed selectors exist; window and document
/// are always present.
pub struct MockPage {
    present: Vec<&'static str>,
    pub wired: Vec<Subscription>,
}

impl MockPage {
    pub fn with(present: &[&'static str]) -> Self {
        Self {
            present: present.to_vec(),
            wired: Vec::new(),
        }
    }

    pub fn full() -> Self {
        Self::with(&["*"])
    }
}

impl EventSource for MockPage {
    fn subscribe(&mut self, subscription: &Subscription) -> bool {
        let found = match subscription.target {
            Target::Window | Target::Document => true,
            Target::Selector(selector) => {
                self.present.contains(&"*") || self.present.contains(&selector)
            }
        };
        if found {
            self.wired.push(*subscription);
        }
        found
    }
}

pub fn notices(effects: &[Effect]) -> Vec<&NoticeView> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ShowNotice(view) => Some(view),
            _ => None,
        })
        .collect()
}

pub fn notice_kinds(effects: &[Effect]) -> Vec<NoticeKind> {
    notices(effects).iter().map(|view| view.kind).collect()
}

pub fn navigations(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Navigate(href) => Some(href.as_str()),
            _ => None,
        })
        .collect()
}
