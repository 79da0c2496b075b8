//! Declarative track table behind [`NodeGraph::standard`](super::NodeGraph::standard).
//!
//! A track is a chain of nodes `<prefix>_n0 .. <prefix>_n<len-1>`. The first
//! node hangs off the entry sentinel or a parent node, every later node off
//! its predecessor.

use strum::IntoEnumIterator;

use super::Node;
use crate::catalog::ModCategory;
use crate::schema::{PRIMARY_SKILLS, SliverwareSet, TRAINED_SKILLS};

const LANGUAGE_SLOTS: usize = 8;
const PRIMARY_RANKS: usize = 6;
const TRAINED_RANKS: usize = 5;
const EDGES_PER_SKILL: usize = 3;
const TRAIT_SLOTS: usize = 10;
const INJURY_SLOTS: usize = 5;
const WOUND_SLOTS: usize = 5;
const DISCIPLE_SLOTS: usize = 3;
const RANK_SLOTS: usize = 3;
const OPPORTUNITY_SLOTS: usize = 4;
const SOULWEAVE_SLOTS: usize = 3;
const EXTRA_SLOTS: usize = 4;
const IMPLANTS_PER_SET: usize = 7;
const MASTERY_SLOTS: usize = 3;

/// Where the first node of a track is connected.
enum Anchor {
    Entry,
    Parent(String),
}

struct Track {
    prefix: String,
    display: String,
    category: ModCategory,
    kind: String,
    len: usize,
    anchor: Anchor,
    requirement: Option<&'static str>,
    extra_kind: Option<&'static str>,
}

impl Track {
    fn new(
        prefix: impl Into<String>,
        category: ModCategory,
        kind: impl Into<String>,
        len: usize,
    ) -> Self {
        let prefix = prefix.into();
        Self {
            display: title_case(&prefix),
            prefix,
            category,
            kind: kind.into(),
            len,
            anchor: Anchor::Entry,
            requirement: None,
            extra_kind: None,
        }
    }

    fn under(mut self, parent: impl Into<String>) -> Self {
        self.anchor = Anchor::Parent(parent.into());
        self
    }

    fn requiring(mut self, mod_id: &'static str) -> Self {
        self.requirement = Some(mod_id);
        self
    }

    fn also_accepting(mut self, kind: &'static str) -> Self {
        self.extra_kind = Some(kind);
        self
    }

    fn emit(self, out: &mut Vec<Node>) {
        for step in 0..self.len {
            let mut node = Node::new(
                location(&self.prefix, step),
                format!("{} {}", self.display, step + 1),
                self.category,
            )
            .allow_type(self.kind.clone());
            if let Some(extra) = self.extra_kind {
                node = node.allow_extra_type(extra);
            }
            if let Some(required) = self.requirement {
                node = node.require(required);
            }
            node = match (step, &self.anchor) {
                (0, Anchor::Entry) => node.from_entry(),
                (0, Anchor::Parent(parent)) => node.connect(parent.clone()),
                (_, _) => node.connect(location(&self.prefix, step - 1)),
            };
            out.push(node);
        }
    }
}

fn location(prefix: &str, step: usize) -> String {
    format!("{prefix}_n{step}")
}

fn title_case(prefix: &str) -> String {
    prefix
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(super) fn standard_nodes() -> Vec<Node> {
    let mut nodes = Vec::new();

    for (prefix, category, kind) in [
        ("breed", ModCategory::Breed, "brd"),
        ("culture", ModCategory::Culture, "cul"),
        ("citizen", ModCategory::Citizen, "cit"),
        ("social", ModCategory::Social, "soc"),
        ("name", ModCategory::Name, "nam"),
    ] {
        Track::new(prefix, category, kind, 1).emit(&mut nodes);
    }
    Track::new("language", ModCategory::Language, "lng", LANGUAGE_SLOTS).emit(&mut nodes);

    for primary in PRIMARY_SKILLS {
        Track::new(format!("{primary}_skill"), ModCategory::Skill, "pri", PRIMARY_RANKS)
            .emit(&mut nodes);
    }
    for (skill, primary) in TRAINED_SKILLS {
        Track::new(format!("{skill}_skill"), ModCategory::Skill, "skl", TRAINED_RANKS)
            .under(location(&format!("{primary}_skill"), 0))
            .emit(&mut nodes);
    }
    for (skill, _) in TRAINED_SKILLS {
        Track::new(format!("{skill}_edge"), ModCategory::Edge, "edg", EDGES_PER_SKILL)
            .under(location(&format!("{skill}_skill"), 1))
            .also_accepting("ech")
            .emit(&mut nodes);
    }

    Track::new("trait", ModCategory::Trait, "trt", TRAIT_SLOTS).emit(&mut nodes);
    Track::new("injury", ModCategory::Injury, "inj", INJURY_SLOTS).emit(&mut nodes);
    Track::new("wound", ModCategory::Wound, "wnd", WOUND_SLOTS).emit(&mut nodes);
    Track::new("disciple", ModCategory::Disciple, "dsc", DISCIPLE_SLOTS)
        .requiring("t_disciple")
        .emit(&mut nodes);
    Track::new("organisation", ModCategory::Organisation, "org", 1).emit(&mut nodes);
    Track::new("rank", ModCategory::Rank, "rnk", RANK_SLOTS)
        .under(location("organisation", 0))
        .emit(&mut nodes);
    Track::new("opportunity", ModCategory::Opportunity, "opp", OPPORTUNITY_SLOTS)
        .emit(&mut nodes);
    Track::new("soulweaving", ModCategory::Soulweaving, "slw", SOULWEAVE_SLOTS)
        .requiring("t_soulweaver")
        .emit(&mut nodes);
    Track::new("slot", ModCategory::Slot, "slt", EXTRA_SLOTS).emit(&mut nodes);

    for set in SliverwareSet::iter() {
        Track::new(set.node_prefix(), ModCategory::Sliverware, set.kind(), IMPLANTS_PER_SET)
            .emit(&mut nodes);
        nodes.push(
            Node::new(
                set.complete_location(),
                format!("{} Complete", title_case(&set.node_prefix())),
                ModCategory::Sliverware,
            )
            .allow_mod(set.complete_mod())
            .managed(),
        );
    }

    Track::new("mastery", ModCategory::Skill, "spm", MASTERY_SLOTS).emit(&mut nodes);
    nodes.push(
        Node::new(location("lifestyle", 0), "Lifestyle", ModCategory::Lifestyle)
            .allow_type("lsf")
            .managed(),
    );

    nodes
}
