//! Text rendering of decision trees.

use termtree::Tree;

use crate::domain::DecisionNode;

pub trait ToDisplayTree {
    fn to_display_tree(&self) -> Tree<String>;
}

impl ToDisplayTree for DecisionNode {
    fn to_display_tree(&self) -> Tree<String> {
        render(self, None)
    }
}

fn render(node: &DecisionNode, branch: Option<&str>) -> Tree<String> {
    let prefix = branch.map(|b| format!("{b}: ")).unwrap_or_default();
    match node {
        DecisionNode::Split {
            question, yes, no, ..
        } => Tree::new(format!("{prefix}{question}"))
            .with_leaves([render(yes, Some("yes")), render(no, Some("no"))]),
        DecisionNode::Card { card_name, .. } => Tree::new(format!("{prefix}{card_name}")),
        DecisionNode::Ambiguous { remaining, .. } => {
            Tree::new(format!("{prefix}one of {}", remaining.join(", ")))
        }
    }
}
