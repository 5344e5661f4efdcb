use rand::seq::SliceRandom;
use rand::Rng;

/// Parallel train/test partitions. `train_*` is the prefix, `test_*` the suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<X, Y> {
    pub train_x: Vec<X>,
    pub train_y: Vec<Y>,
    pub test_x: Vec<X>,
    pub test_y: Vec<Y>,
}

impl<X, Y> Split<X, Y> {
    pub fn train_len(&self) -> usize { self.train_x.len() }

    pub fn test_len(&self) -> usize { self.test_x.len() }
}

/// First `train_size` rows train, the rest test, order preserved.
/// `None` when `train_size` exceeds the row count or the sequences differ in length.
pub fn split<X, Y>(mut xs: Vec<X>, mut ys: Vec<Y>, train_size: usize) -> Option<Split<X, Y>> {
    if xs.len() != ys.len() || train_size > xs.len() {
        return None;
    }
    let test_x = xs.split_off(train_size);
    let test_y = ys.split_off(train_size);
    Some(Split { train_x: xs, train_y: ys, test_x, test_y })
}

/// Apply one random permutation to both sequences so row `i` of `xs` still pairs with row `i` of `ys`.
/// `None` when the sequences differ in length.
pub fn shuffle_together<X, Y, R: Rng + ?Sized>(xs: Vec<X>, ys: Vec<Y>, rng: &mut R) -> Option<(Vec<X>, Vec<Y>)> {
    if xs.len() != ys.len() {
        return None;
    }
    let mut order: Vec<usize> = (0..xs.len()).collect();
    order.shuffle(rng);

    let mut xs: Vec<Option<X>> = xs.into_iter().map(Some).collect();
    let mut ys: Vec<Option<Y>> = ys.into_iter().map(Some).collect();
    let mut out_x = Vec::with_capacity(order.len());
    let mut out_y = Vec::with_capacity(order.len());
    for i in order {
        if let (Some(x), Some(y)) = (xs[i].take(), ys[i].take()) {
            out_x.push(x);
            out_y.push(y);
        }
    }
    Some((out_x, out_y))
}
