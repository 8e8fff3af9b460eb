//! Sequential composition of systems

use super::entity::{Entity, EntityId};
use super::scene::Scene;
use super::system::{FrameError, System};

/// A system composed of an ordered list of child systems
///
/// Lifecycle calls and entity events broadcast to every child in
/// registration order, unconditionally; each child decides relevance
/// through its own required-component check. Registration order is fixed
/// at assembly time and is the only ordering mechanism in the engine:
/// a clear system must be registered before the draw systems it prepares
/// for, and a buffer-swap system last.
///
/// Children run strictly sequentially on the calling thread; a failing
/// child aborts the broadcast (fail-fast, no partial rollback).
#[derive(Default)]
pub struct SequentialSystem {
    children: Vec<Box<dyn System>>,
}

impl SequentialSystem {
    /// Create a pipeline from an ordered list of child systems
    pub fn new(children: Vec<Box<dyn System>>) -> Self {
        Self { children }
    }

    /// Append a child system
    pub fn push(&mut self, child: Box<dyn System>) {
        self.children.push(child);
    }

    /// Insert a child system at the given position
    ///
    /// # Panics
    /// Panics if `index` is greater than the current number of children.
    pub fn insert(&mut self, index: usize, child: Box<dyn System>) {
        self.children.insert(index, child);
    }

    /// Number of child systems
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the pipeline has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl System for SequentialSystem {
    fn start(&mut self) -> Result<(), FrameError> {
        for child in &mut self.children {
            child.start()?;
        }
        Ok(())
    }

    fn step(&mut self, scene: &mut Scene, delta: f32) -> Result<(), FrameError> {
        for child in &mut self.children {
            child.step(scene, delta)?;
        }
        Ok(())
    }

    fn add(&mut self, entity: &Entity) {
        for child in &mut self.children {
            child.add(entity);
        }
    }

    fn remove(&mut self, id: EntityId) {
        for child in &mut self.children {
            child.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records every lifecycle call it receives, tagged with its name.
    struct Probe {
        name: &'static str,
        calls: Rc<RefCell<Vec<String>>>,
        fail_on_start: bool,
    }

    impl Probe {
        fn new(name: &'static str, calls: Rc<RefCell<Vec<String>>>) -> Self {
            Self { name, calls, fail_on_start: false }
        }

        fn failing(name: &'static str, calls: Rc<RefCell<Vec<String>>>) -> Self {
            Self { name, calls, fail_on_start: true }
        }

        fn record(&self, event: &str) {
            self.calls.borrow_mut().push(format!("{}:{}", self.name, event));
        }
    }

    impl System for Probe {
        fn start(&mut self) -> Result<(), FrameError> {
            self.record("start");
            if self.fail_on_start {
                return Err(FrameError::Other("probe failure".into()));
            }
            Ok(())
        }

        fn step(&mut self, _scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
            self.record("step");
            Ok(())
        }

        fn add(&mut self, _entity: &Entity) {
            self.record("add");
        }

        fn remove(&mut self, _id: EntityId) {
            self.record("remove");
        }
    }

    fn pipeline_with_probes(calls: &Rc<RefCell<Vec<String>>>) -> SequentialSystem {
        SequentialSystem::new(vec![
            Box::new(Probe::new("s1", calls.clone())),
            Box::new(Probe::new("s2", calls.clone())),
            Box::new(Probe::new("s3", calls.clone())),
        ])
    }

    #[test]
    fn test_add_broadcasts_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = pipeline_with_probes(&calls);

        pipeline.add(&Entity::new());
        assert_eq!(*calls.borrow(), vec!["s1:add", "s2:add", "s3:add"]);
    }

    #[test]
    fn test_remove_broadcasts_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = pipeline_with_probes(&calls);

        pipeline.remove(Entity::new().id());
        assert_eq!(*calls.borrow(), vec!["s1:remove", "s2:remove", "s3:remove"]);
    }

    #[test]
    fn test_step_runs_each_child_exactly_once_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = pipeline_with_probes(&calls);
        let mut scene = Scene::new();

        pipeline.step(&mut scene, 0.016).unwrap();
        assert_eq!(*calls.borrow(), vec!["s1:step", "s2:step", "s3:step"]);
    }

    #[test]
    fn test_start_failure_aborts_remaining_children() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = SequentialSystem::new(vec![
            Box::new(Probe::new("s1", calls.clone())),
            Box::new(Probe::failing("s2", calls.clone())),
            Box::new(Probe::new("s3", calls.clone())),
        ]);

        assert!(pipeline.start().is_err());
        assert_eq!(*calls.borrow(), vec!["s1:start", "s2:start"]);
    }

    #[test]
    fn test_pipelines_nest() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let inner = SequentialSystem::new(vec![
            Box::new(Probe::new("inner1", calls.clone())),
            Box::new(Probe::new("inner2", calls.clone())),
        ]);
        let mut outer = SequentialSystem::new(vec![
            Box::new(Probe::new("outer1", calls.clone())),
            Box::new(inner),
        ]);

        outer.add(&Entity::new());
        assert_eq!(*calls.borrow(), vec!["outer1:add", "inner1:add", "inner2:add"]);
    }
}
