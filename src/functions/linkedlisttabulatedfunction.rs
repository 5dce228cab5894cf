use std::fmt;

use tracing::debug;

use crate::functions::functionerror::FunctionError;
use crate::functions::mathfunction::MathFunction;
use crate::functions::point::Point;
use crate::functions::tabulatedfunction::{
    Grid,
    Insertable,
    Removable,
    TabulatedFunction,
    check_index,
    check_lengths,
    check_samples,
    closest_match,
    evaluate,
    matches,
    sample_grid,
    sealed
};

// ─────────────────────────────────────────────
// Ring node
// ─────────────────────────────────────────────
//
// 節點存在 arena（Vec<Node>）中，以 slot index 互相連結，構成環狀雙向串列：
//   head 為最左端的點，nodes[head].prev 為最右端的點。
// 被移除的 slot 放進 vacant，下一次 insert 重複使用。

#[derive(Debug, Clone, Copy)]
struct Node {
    x: f64,
    y: f64,
    prev: usize,
    next: usize,
}

/// Tabulated function backed by a circular doubly linked ring of nodes.
///
/// # Performance
/// Positional access walks the ring from whichever end is closer: forward
/// from the head when `index <= count / 2`, backward from the tail otherwise.
/// A lookup therefore costs O(min(index, count - index)) node hops.
#[derive(Clone)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<Node>,
    vacant: Vec<usize>,
    head: usize,
    count: usize,
}

impl LinkedListTabulatedFunction {
    /// Rejects mismatched lengths, fewer than 2 points and unsorted x.
    pub fn new(x_values: &[f64], y_values: &[f64]) -> Result<LinkedListTabulatedFunction, FunctionError> {
        check_samples(x_values, y_values)?;
        Ok(Self::from_sorted(x_values, y_values))
    }

    /// Samples `source` at `count` evenly spaced points of `[from, to]`.
    pub fn from_function<S>(
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<LinkedListTabulatedFunction, FunctionError>
    where
        S: MathFunction + ?Sized,
    {
        let (x_values, y_values) = sample_grid(source, from, to, count)?;
        Ok(Self::from_sorted(&x_values, &y_values))
    }

    /// Builds on a grid taken from an existing function; ordering is not re-checked.
    pub(crate) fn from_grid(grid: Grid<'_>, y_values: &[f64]) -> Result<LinkedListTabulatedFunction, FunctionError> {
        check_lengths(grid.x_values(), y_values)?;
        Ok(Self::from_sorted(grid.x_values(), y_values))
    }

    fn from_sorted(x_values: &[f64], y_values: &[f64]) -> LinkedListTabulatedFunction {
        let count = x_values.len();
        let nodes = x_values
            .iter()
            .zip(y_values.iter())
            .enumerate()
            .map(|(i, (&x, &y))| Node {
                x,
                y,
                prev: (i + count - 1) % count,
                next: (i + 1) % count,
            })
            .collect();
        LinkedListTabulatedFunction { nodes, vacant: Vec::new(), head: 0, count }
    }

    fn tail(&self) -> usize {
        self.nodes[self.head].prev
    }

    /// Slot of the `index`-th node, walking from the closer end of the ring.
    fn slot(&self, index: usize) -> usize {
        if index <= self.count / 2 {
            let mut slot = self.head;
            for _ in 0..index {
                slot = self.nodes[slot].next;
            }
            slot
        } else {
            let mut slot = self.tail();
            for _ in 0..(self.count - 1 - index) {
                slot = self.nodes[slot].prev;
            }
            slot
        }
    }

    fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        let mut slot = self.head;
        (0..self.count).map(move |_| {
            let current = slot;
            slot = self.nodes[current].next;
            current
        })
    }

    fn allocate(&mut self, node: Node) -> usize {
        match self.vacant.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Links a new node in front of `successor`.
    fn link_before(&mut self, successor: usize, x: f64, y: f64) -> usize {
        let predecessor = self.nodes[successor].prev;
        let slot = self.allocate(Node { x, y, prev: predecessor, next: successor });
        self.nodes[predecessor].next = slot;
        self.nodes[successor].prev = slot;
        self.count += 1;
        slot
    }
}

impl sealed::Sealed for LinkedListTabulatedFunction {
    fn sample(&self, index: usize) -> Point {
        let node = &self.nodes[self.slot(index)];
        Point::new(node.x, node.y)
    }
}

impl MathFunction for LinkedListTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        evaluate(self, x)
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn count(&self) -> usize {
        self.count
    }

    fn x(&self, index: usize) -> Result<f64, FunctionError> {
        check_index(index, self.count)?;
        Ok(self.nodes[self.slot(index)].x)
    }

    fn y(&self, index: usize) -> Result<f64, FunctionError> {
        check_index(index, self.count)?;
        Ok(self.nodes[self.slot(index)].y)
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), FunctionError> {
        check_index(index, self.count)?;
        let slot = self.slot(index);
        self.nodes[slot].y = value;
        Ok(())
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        closest_match(self.slots().map(|slot| self.nodes[slot].x), x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.slots().position(|slot| matches(self.nodes[slot].y, y))
    }

    fn left_bound(&self) -> f64 {
        self.nodes[self.head].x
    }

    fn right_bound(&self) -> f64 {
        self.nodes[self.tail()].x
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, FunctionError> {
        let left_bound = self.left_bound();
        if !(x >= left_bound) {
            return Err(FunctionError::BelowLeftBound { x, left_bound });
        }
        let above = self
            .slots()
            .position(|slot| self.nodes[slot].x > x)
            .unwrap_or(self.count);
        Ok(above - 1)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.slots().map(move |slot| {
            let node = &self.nodes[slot];
            Point::new(node.x, node.y)
        }))
    }
}

impl Insertable for LinkedListTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), FunctionError> {
        if x.is_nan() {
            return Err(FunctionError::NotANumber);
        }
        if x.is_infinite() {
            return Err(FunctionError::NotFinite(x));
        }
        if let Some(index) = self.index_of_x(x) {
            let slot = self.slot(index);
            self.nodes[slot].y = y;
            return Ok(());
        }
        let successor = self.slots().find(|&slot| self.nodes[slot].x > x);
        match successor {
            Some(successor) => {
                let slot = self.link_before(successor, x, y);
                if successor == self.head {
                    self.head = slot;
                }
            }
            // 比所有點都大：接在 tail 之後（也就是 head 之前）
            None => {
                self.link_before(self.head, x, y);
            }
        }
        debug!(x, y, count = self.count, "inserted node");
        Ok(())
    }
}

impl Removable for LinkedListTabulatedFunction {
    fn remove(&mut self, index: usize) -> Result<(), FunctionError> {
        check_index(index, self.count)?;
        if self.count <= 2 {
            return Err(FunctionError::NotEnoughPoints { count: self.count - 1 });
        }
        let slot = self.slot(index);
        let Node { prev, next, .. } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if slot == self.head {
            self.head = next;
        }
        self.vacant.push(slot);
        self.count -= 1;
        debug!(index, count = self.count, "removed node");
        Ok(())
    }
}

impl fmt::Debug for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::functions::tabulatedfunction::write_points(f, "LinkedListTabulatedFunction", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::simplefunctions::SqrFunction;
    use approx::assert_relative_eq;

    fn sample() -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap()
    }

    fn xs(f: &LinkedListTabulatedFunction) -> Vec<f64> {
        f.iter().map(|p| p.x()).collect()
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            LinkedListTabulatedFunction::new(&[1.0], &[1.0]),
            Err(FunctionError::NotEnoughPoints { count: 1 })
        ));
        assert!(matches!(
            LinkedListTabulatedFunction::new(&[1.0, 1.0], &[1.0, 2.0]),
            Err(FunctionError::NotStrictlyIncreasing { index: 1 })
        ));
    }

    #[test]
    fn test_ring_links() {
        let f = sample();
        assert_eq!(f.nodes[f.head].x, 1.0);
        assert_eq!(f.nodes[f.tail()].x, 5.0);
        assert_eq!(f.nodes[f.tail()].next, f.head);
    }

    #[test]
    fn test_positional_access_from_both_ends() {
        let f = sample();
        for i in 0..5 {
            assert_eq!(f.x(i), Ok((i + 1) as f64));
            assert_eq!(f.y(i), Ok(10.0 * (i + 1) as f64));
        }
        assert_eq!(f.x(5), Err(FunctionError::IndexOutOfBounds { index: 5, count: 5 }));
    }

    #[test]
    fn test_bounds_and_lookup() {
        let f = sample();
        assert_eq!(f.left_bound(), 1.0);
        assert_eq!(f.right_bound(), 5.0);
        assert_eq!(f.index_of_x(4.0), Some(3));
        assert_eq!(f.index_of_x(4.0 + 1e-11), Some(3));
        assert_eq!(f.index_of_x(4.5), None);
        assert_eq!(f.index_of_y(50.0), Some(4));
    }

    #[test]
    fn test_floor_index() {
        let f = sample();
        assert_eq!(f.floor_index_of_x(1.0), Ok(0));
        assert_eq!(f.floor_index_of_x(3.7), Ok(2));
        assert_eq!(f.floor_index_of_x(5.0), Ok(4));
        assert_eq!(f.floor_index_of_x(7.0), Ok(4));
        assert_eq!(
            f.floor_index_of_x(0.0),
            Err(FunctionError::BelowLeftBound { x: 0.0, left_bound: 1.0 })
        );
    }

    #[test]
    fn test_apply() {
        let f = sample();
        assert_eq!(f.apply(3.0), 30.0);
        assert_relative_eq!(f.apply(3.5), 35.0);
        assert_relative_eq!(f.apply(-1.0), -10.0);
        assert_relative_eq!(f.apply(6.0), 60.0);
    }

    #[test]
    fn test_set_y() {
        let mut f = sample();
        f.set_y(4, 0.0).unwrap();
        assert_eq!(f.y(4), Ok(0.0));
        assert_eq!(f.right_bound(), 5.0);
    }

    #[test]
    fn test_from_function() {
        let f = LinkedListTabulatedFunction::from_function(&SqrFunction, 2.0, -2.0, 5).unwrap();
        assert_eq!(xs(&f), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(f.y(0), Ok(4.0));
        assert_eq!(f.y(2), Ok(0.0));
    }

    #[test]
    fn test_insert_at_head_middle_and_tail() {
        let mut f = sample();
        f.insert(0.0, 0.0).unwrap();
        f.insert(2.5, 25.0).unwrap();
        f.insert(6.0, 60.0).unwrap();
        assert_eq!(xs(&f), vec![0.0, 1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(f.left_bound(), 0.0);
        assert_eq!(f.right_bound(), 6.0);
        assert_eq!(f.y(3), Ok(25.0));
    }

    #[test]
    fn test_insert_overwrites_existing_x() {
        let mut f = sample();
        f.insert(2.0, -2.0).unwrap();
        assert_eq!(f.count(), 5);
        assert_eq!(f.y(1), Ok(-2.0));
        assert_eq!(f.insert(f64::NEG_INFINITY, 0.0), Err(FunctionError::NotFinite(f64::NEG_INFINITY)));
    }

    #[test]
    fn test_samples_closer_than_tolerance() {
        let mut f = LinkedListTabulatedFunction::new(&[0.0, 5e-11, 1.0], &[0.0, 100.0, 200.0]).unwrap();
        assert_eq!(f.index_of_x(5e-11), Some(1));
        assert_eq!(f.apply(5e-11), 100.0);

        f.insert(5e-11, -1.0).unwrap();
        assert_eq!(f.count(), 3);
        assert_eq!(f.y(0), Ok(0.0));
        assert_eq!(f.y(1), Ok(-1.0));
    }

    #[test]
    fn test_remove_reuses_slots() {
        let mut f = sample();
        f.remove(0).unwrap();
        assert_eq!(f.left_bound(), 2.0);
        f.remove(3).unwrap();
        assert_eq!(f.right_bound(), 4.0);
        assert_eq!(xs(&f), vec![2.0, 3.0, 4.0]);

        f.insert(3.5, 35.0).unwrap();
        assert_eq!(f.nodes.len(), 5);
        assert_eq!(xs(&f), vec![2.0, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn test_remove_keeps_two_points() {
        let mut f = LinkedListTabulatedFunction::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert_eq!(f.remove(0), Err(FunctionError::NotEnoughPoints { count: 1 }));
        assert_eq!(f.remove(2), Err(FunctionError::IndexOutOfBounds { index: 2, count: 2 }));
    }

    #[test]
    fn test_display() {
        let f = LinkedListTabulatedFunction::new(&[0.0, 1.0], &[2.0, 3.5]).unwrap();
        assert_eq!(f.to_string(), "LinkedListTabulatedFunction size = 2\n[0; 2]\n[1; 3.5]");
        assert_eq!(format!("{:?}", f), "[Point { x: 0.0, y: 2.0 }, Point { x: 1.0, y: 3.5 }]");
    }
}
