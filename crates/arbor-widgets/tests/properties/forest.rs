//! Forest generator shared by the property modules.

use arbor_widgets::tree_select::{Node, RootGroup};
use proptest::prelude::*;

#[derive(Debug, Clone)]
pub enum Shape {
    Leaf,
    Empty,
    Parent(Vec<Shape>),
}

pub fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![3 => Just(Shape::Leaf), 1 => Just(Shape::Empty)];
    leaf.prop_recursive(4, 48, 4, |inner| {
        proptest::collection::vec(inner, 1..4).prop_map(Shape::Parent)
    })
}

pub fn forest() -> impl Strategy<Value = Vec<Vec<Shape>>> {
    proptest::collection::vec(proptest::collection::vec(shape(), 0..4), 1..4)
}

/// Ids repeat by sibling position; display names are unique.
pub fn build(forest: &[Vec<Shape>]) -> Vec<RootGroup<u32>> {
    let mut counter = 0;
    forest
        .iter()
        .enumerate()
        .map(|(g, shapes)| RootGroup::new(format!("Group {g}"), nodes(shapes, &mut counter)))
        .collect()
}

fn nodes(shapes: &[Shape], counter: &mut u32) -> Vec<Node<u32>> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            *counter += 1;
            let id = format!("n{i}");
            let name = format!("node {counter}");
            let data = *counter;
            let node = match shape {
                Shape::Leaf => Node::leaf(id, name),
                Shape::Empty => Node::empty_parent(id, name),
                Shape::Parent(kids) => Node::parent(id, name, nodes(kids, counter)),
            };
            node.with_data(data)
        })
        .collect()
}
