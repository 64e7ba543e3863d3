//=========================================================================
// Node Manager
//=========================================================================
//
// Per-scene registry of logic trees. Runs after the logic bricks each
// tick, so trees see brick-driven state changes within the same tick.
//
// A tree only runs while its owner is loaded and in an active layer.
// Trees survive scene unload and resume when their owner is reloaded.
// Tree indices stay valid until `clear()`; removing an owner's trees
// leaves empty slots.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::tree::LogicTree;
use crate::core::input::StateTracker;
use crate::core::object::{GameObjects, ObjectId};

//=== NodeManager =========================================================

#[derive(Debug, Clone, Default)]
pub struct NodeManager {
    trees: Vec<Option<LogicTree>>,
}

impl NodeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tree and returns its index.
    pub fn add_tree(&mut self, tree: LogicTree) -> usize {
        debug!("Registered logic tree '{}' ({} nodes)", tree.name(), tree.len());
        self.trees.push(Some(tree));
        self.trees.len() - 1
    }

    pub fn tree(&self, index: usize) -> Option<&LogicTree> {
        self.trees.get(index).and_then(Option::as_ref)
    }

    pub fn tree_mut(&mut self, index: usize) -> Option<&mut LogicTree> {
        self.trees.get_mut(index).and_then(Option::as_mut)
    }

    pub fn trees_of(&self, owner: ObjectId) -> impl Iterator<Item = &LogicTree> {
        self.trees.iter().flatten().filter(move |t| t.owner() == owner)
    }

    /// Live trees.
    pub fn len(&self) -> usize {
        self.trees.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.iter().all(Option::is_none)
    }

    /// Copies every tree of `source` onto `target`.
    pub fn clone_trees(&mut self, source: ObjectId, target: ObjectId) {
        let copies: Vec<LogicTree> = self
            .trees_of(source)
            .map(|tree| {
                let mut copy = tree.clone();
                copy.set_owner(target);
                copy
            })
            .collect();
        self.trees.extend(copies.into_iter().map(Some));
    }

    pub fn remove_trees_of(&mut self, owner: ObjectId) {
        for slot in &mut self.trees {
            if slot.as_ref().is_some_and(|t| t.owner() == owner) {
                *slot = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.trees.clear();
    }

    /// Runs every tree whose owner is loaded and in `active_layers`.
    pub fn update(
        &mut self,
        tick: f32,
        objects: &mut GameObjects,
        input: &StateTracker,
        active_layers: u32,
    ) {
        for tree in self.trees.iter_mut().flatten() {
            let runnable = objects
                .get(tree.owner())
                .is_some_and(|o| o.is_loaded() && o.in_layer(active_layers));
            if runnable {
                tree.execute(objects, input, tick);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logic::nodes::TimerNode;
    use crate::core::logic::tree::SocketRef;
    use crate::core::object::{GameObject, ObjectKind};

    fn elapsed(manager: &NodeManager, index: usize) -> f32 {
        let tree = manager.tree(index).unwrap();
        tree.socket(SocketRef::new(crate::core::logic::tree::NodeId(0), TimerNode::ELAPSED))
            .unwrap()
            .real()
    }

    #[test]
    fn skips_unloaded_and_inactive_owners() {
        let mut objects = GameObjects::new();
        let owner = objects.insert(GameObject::new("a", ObjectKind::Object)).unwrap();
        let input = StateTracker::new();

        let mut manager = NodeManager::new();
        let mut tree = LogicTree::new("timer", owner);
        tree.add_node(TimerNode::new());
        let index = manager.add_tree(tree);

        manager.update(1.0, &mut objects, &input, 1);
        assert_eq!(elapsed(&manager, index), 0.0);

        objects.get_mut(owner).unwrap().set_loaded(true);
        manager.update(1.0, &mut objects, &input, 1);
        assert_eq!(elapsed(&manager, index), 1.0);

        manager.update(1.0, &mut objects, &input, 2);
        assert_eq!(elapsed(&manager, index), 1.0);
    }

    #[test]
    fn cloned_trees_follow_new_owner() {
        let mut manager = NodeManager::new();
        let mut tree = LogicTree::new("timer", ObjectId(0));
        tree.add_node(TimerNode::new());
        manager.add_tree(tree);

        manager.clone_trees(ObjectId(0), ObjectId(1));

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.trees_of(ObjectId(1)).count(), 1);

        manager.remove_trees_of(ObjectId(0));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn tree_indices_survive_removal_of_earlier_trees() {
        let mut manager = NodeManager::new();
        let first = manager.add_tree(LogicTree::new("a", ObjectId(0)));
        let second = manager.add_tree(LogicTree::new("b", ObjectId(1)));

        manager.remove_trees_of(ObjectId(0));

        assert!(manager.tree(first).is_none());
        assert_eq!(manager.tree(second).map(|t| t.name()), Some("b"));
        assert_eq!(manager.add_tree(LogicTree::new("c", ObjectId(0))), 2);
        assert_eq!(manager.len(), 2);
    }
}
