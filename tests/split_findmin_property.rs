use proptest::prelude::*;
use thorup_sssp::{SplitFindmin, INFINITE_COST};

/// Naive model of the partition: element costs plus the set of split
/// points (a split point after position p separates p from p+1).
struct NaivePartition {
    costs: Vec<i64>,
    split_after: Vec<bool>,
}

impl NaivePartition {
    fn new(costs: Vec<i64>) -> Self {
        let n = costs.len();
        Self {
            costs,
            split_after: vec![false; n],
        }
    }

    fn decrease(&mut self, at: usize, cost: i64) {
        self.costs[at] = self.costs[at].min(cost);
    }

    fn split(&mut self, at: usize) {
        self.split_after[at] = true;
    }

    fn list_cost(&self, at: usize) -> i64 {
        let mut lo = at;
        while lo > 0 && !self.split_after[lo - 1] {
            lo -= 1;
        }
        let mut hi = at;
        while hi + 1 < self.costs.len() && !self.split_after[hi] {
            hi += 1;
        }
        self.costs[lo..=hi].iter().copied().min().unwrap()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Decrease { at: usize, cost: i64 },
    Split { at: usize },
}

fn op_strategy(n: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..n, 0i64..1_000_000).prop_map(|(at, cost)| Op::Decrease { at, cost }),
        (0..n).prop_map(|at| Op::Split { at }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn agrees_with_naive_model(
        n in 1usize..80,
        raw_costs in prop::collection::vec(0i64..1_000_000, 1..80),
        raw_ops in prop::collection::vec(op_strategy(80), 0..60),
    ) {
        let mut costs = raw_costs;
        costs.resize(n, 500_000);

        let mut sf = SplitFindmin::new(n);
        let handles: Vec<_> = costs
            .iter()
            .enumerate()
            .map(|(i, &c)| sf.add(i, c))
            .collect();
        sf.initialize();
        let mut model = NaivePartition::new(costs);

        for op in raw_ops {
            match op {
                Op::Decrease { at, cost } => {
                    let at = at % n;
                    sf.decrease_cost(handles[at], cost).unwrap();
                    model.decrease(at, cost);
                }
                Op::Split { at } => {
                    let at = at % n;
                    sf.split(handles[at]);
                    model.split(at);
                }
            }
            for (i, &h) in handles.iter().enumerate() {
                prop_assert_eq!(sf.cost(h), model.costs[i], "cost of {}", i);
                prop_assert_eq!(sf.list_cost(h), model.list_cost(i), "list cost of {}", i);
            }
        }
    }

    #[test]
    fn splits_in_any_order_partition_correctly(
        n in 2usize..64,
        order in prop::collection::vec(0usize..64, 1..64),
    ) {
        let costs: Vec<i64> = (0..n).map(|i| ((i * 31) % 97) as i64).collect();
        let mut sf = SplitFindmin::new(n);
        let handles: Vec<_> = costs
            .iter()
            .enumerate()
            .map(|(i, &c)| sf.add(i, c))
            .collect();
        sf.initialize();
        let mut model = NaivePartition::new(costs);

        for raw in order {
            let at = raw % n;
            sf.split(handles[at]);
            model.split(at);
            for (i, &h) in handles.iter().enumerate() {
                prop_assert_eq!(sf.list_cost(h), model.list_cost(i));
            }
        }
    }
}

#[test]
fn infinite_costs_survive_splits() {
    let n = 12;
    let mut sf = SplitFindmin::new(n);
    let handles: Vec<_> = (0..n).map(|i| sf.add(i, INFINITE_COST)).collect();
    sf.initialize();
    sf.split(handles[5]);
    for &h in &handles {
        assert_eq!(sf.list_cost(h), INFINITE_COST);
    }
    sf.decrease_cost(handles[2], 9).unwrap();
    assert_eq!(sf.list_cost(handles[0]), 9);
    assert_eq!(sf.list_cost(handles[6]), INFINITE_COST);
}
