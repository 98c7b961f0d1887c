//! Gabow's split-findmin structure.
//!
//! The structure maintains a partition of a fixed universe `0..n` into
//! contiguous lists. Every element carries a cost; every list knows the
//! minimum cost of its live elements. `decrease_cost` and `split` run in
//! near-constant amortized time by grouping consecutive elements into
//! *superelements* whose sizes are picked through inverse-Ackermann
//! lookups, collecting runs of equal-level superelements into *sublists*
//! (which are split-findmin structures one level down), and keeping the
//! loose leftovers as *singletons*.
//!
//! The classical presentation nests the types (a list of superelements of
//! lists of …). Here the recursion is flattened into index arenas: one
//! arena of lists, one of elements, one of superelements, and one arena of
//! doubly-linked containers threading the element order, the singleton
//! side-lists and the sublist chains. Back-references (element →
//! superelement, superelement → sublist, sublist → list) are plain indices,
//! so the cyclic shape costs nothing and identities stay stable across
//! `split` calls.
//!
//! Partitioning direction matters. `initialize-head` scans right-to-left
//! and `initialize-tail` left-to-right; both produce the same per-level
//! structure with reversed insertion order, which is what lets a `split`
//! re-partition the two halves of a broken superelement without touching
//! anything else. The two hot primitives behind `split` are cut-after and
//! insert-list-after on the container chains, both O(1).

use crate::ackermann::AckermannTable;
use crate::error::{Result, SsspError};

/// Cost sentinel standing in for +∞.
pub const INFINITE_COST: i64 = i64::MAX;

const NIL: u32 = u32::MAX;

/// Handle to an element of the universe, as returned by [`SplitFindmin::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementId(u32);

/// Handle to a list of the current partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListId(u32);

/// A container in one of the doubly-linked chains.
#[derive(Debug, Clone, Copy)]
struct Link {
    item: u32,
    prev: u32,
    next: u32,
}

/// A chain of containers: a left sentinel plus the last container.
/// The chain is empty iff `last == sentinel`. The last container's `next`
/// is NIL, never the sentinel.
#[derive(Debug, Clone, Copy)]
struct Chain {
    sentinel: u32,
    last: u32,
}

#[derive(Debug, Default)]
struct LinkArena {
    links: Vec<Link>,
}

impl LinkArena {
    fn alloc(&mut self, item: u32, prev: u32, next: u32) -> u32 {
        let id = self.links.len() as u32;
        self.links.push(Link { item, prev, next });
        id
    }

    fn new_chain(&mut self) -> Chain {
        let sentinel = self.alloc(NIL, NIL, NIL);
        Chain {
            sentinel,
            last: sentinel,
        }
    }

    /// Wraps the containers `first..=last` into a chain with a fresh
    /// sentinel.
    fn adopt(&mut self, first: u32, last: u32) -> Chain {
        let sentinel = self.alloc(NIL, NIL, first);
        self.links[first as usize].prev = sentinel;
        Chain { sentinel, last }
    }

    fn is_empty(&self, chain: Chain) -> bool {
        chain.sentinel == chain.last
    }

    fn item(&self, container: u32) -> u32 {
        self.links[container as usize].item
    }

    fn next(&self, container: u32) -> u32 {
        self.links[container as usize].next
    }

    fn prev(&self, container: u32) -> u32 {
        self.links[container as usize].prev
    }

    fn first(&self, chain: Chain) -> u32 {
        self.links[chain.sentinel as usize].next
    }

    fn insert_after_raw(&mut self, pos: u32, item: u32) -> u32 {
        let successor = self.links[pos as usize].next;
        let container = self.alloc(item, pos, successor);
        if successor != NIL {
            self.links[successor as usize].prev = container;
        }
        self.links[pos as usize].next = container;
        container
    }

    fn push_back(&mut self, chain: &mut Chain, item: u32) -> u32 {
        let container = self.insert_after_raw(chain.last, item);
        chain.last = container;
        container
    }

    fn push_front(&mut self, chain: &mut Chain, item: u32) -> u32 {
        let container = self.insert_after_raw(chain.sentinel, item);
        if chain.last == chain.sentinel {
            chain.last = container;
        }
        container
    }

    fn insert_after(&mut self, chain: &mut Chain, pos: u32, item: u32) -> u32 {
        let container = self.insert_after_raw(pos, item);
        if pos == chain.last {
            chain.last = container;
        }
        container
    }

    /// Unlinks `container` and returns its predecessor.
    fn remove(&mut self, chain: &mut Chain, container: u32) -> u32 {
        if container == chain.last {
            chain.last = self.links[container as usize].prev;
        }
        let prev = self.links[container as usize].prev;
        let next = self.links[container as usize].next;
        self.links[prev as usize].next = next;
        if next != NIL {
            self.links[next as usize].prev = prev;
        }
        prev
    }

    /// Cuts the chain after `container`; the tail becomes a new chain.
    fn cut_after(&mut self, chain: &mut Chain, container: u32) -> Chain {
        if container == chain.last {
            self.new_chain()
        } else {
            let first = self.links[container as usize].next;
            let tail = self.adopt(first, chain.last);
            self.links[container as usize].next = NIL;
            chain.last = container;
            tail
        }
    }

    /// Splices `other` into the chain right after `pos`; returns the last
    /// inserted container (or `pos` when `other` is empty).
    fn splice_after(&mut self, chain: &mut Chain, pos: u32, other: Chain) -> u32 {
        if self.is_empty(other) {
            return pos;
        }
        let other_first = self.links[other.sentinel as usize].next;
        let successor = self.links[pos as usize].next;
        if successor != NIL {
            self.links[successor as usize].prev = other.last;
            self.links[other.last as usize].next = successor;
        }
        self.links[pos as usize].next = other_first;
        self.links[other_first as usize].prev = pos;
        if pos == chain.last {
            chain.last = other.last;
        }
        other.last
    }

    /// Appends `other` onto the chain.
    fn concat(&mut self, chain: &mut Chain, other: Chain) {
        if self.is_empty(other) {
            return;
        }
        let other_first = self.links[other.sentinel as usize].next;
        self.links[chain.last as usize].next = other_first;
        self.links[other_first as usize].prev = chain.last;
        chain.last = other.last;
    }

    /// Items of the chain, front to back.
    fn items(&self, chain: Chain) -> Vec<u32> {
        let mut out = Vec::new();
        let mut current = self.first(chain);
        while current != NIL {
            out.push(self.item(current));
            current = self.next(current);
        }
        out
    }
}

#[derive(Debug, Clone)]
struct ElemData {
    /// Universe index on the head level; superelement id inside sublists.
    item: u32,
    cost: i64,
    /// Containing superelement, if any.
    superelement: u32,
    /// Containing list when this element is a loose leftover.
    containing_list: u32,
    /// Container in the owning list's element chain.
    container: u32,
    /// Container in the owning list's leftover chain, when a leftover.
    container_singleton: u32,
}

#[derive(Debug, Clone)]
struct SuperData {
    level: i32,
    /// First and last member element.
    first: u32,
    last: u32,
    /// Minimum cost over the member elements.
    cost: i64,
    /// Containing list, when this superelement is a singleton.
    containing_list: u32,
    /// Container in the containing list's singleton-superelement chain.
    container_singleton: u32,
    /// The element representing this superelement in its sublist.
    element_in_sublist: u32,
    /// The sublist holding that element.
    containing_sublist: u32,
}

#[derive(Debug, Clone)]
struct ListData {
    /// Recursion index; sublists sit one level below their parent.
    level: i32,
    /// Minimum cost over all elements of the list.
    cost: i64,
    elements: Chain,
    singleton_elements: Chain,
    singleton_supers: Chain,
    sublists: Chain,
    /// Parent list when this is a sublist.
    containing_list: u32,
    /// Container holding this sublist in the parent's sublist chain.
    container_in_sublists: u32,
}

/// Scan direction of the partitioning pass.
///
/// `Head` scans right-to-left and prepends, `Tail` scans left-to-right and
/// appends; both yield the same structure over the same elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Head,
    Tail,
}

/// The three side-chains produced by one partitioning pass.
#[derive(Debug, Clone, Copy)]
struct PartitionOut {
    singleton_elements: Chain,
    singleton_supers: Chain,
    sublists: Chain,
}

/// Gabow's split-findmin structure over a universe of integer items.
#[derive(Debug)]
pub struct SplitFindmin {
    ackermann: AckermannTable,
    links: LinkArena,
    lists: Vec<ListData>,
    elems: Vec<ElemData>,
    supers: Vec<SuperData>,
    head: u32,
    initialized: bool,
}

impl SplitFindmin {
    /// Creates a structure for a universe of `n` elements, assuming up to
    /// `n` decrease-cost operations.
    pub fn new(n: usize) -> Self {
        Self::with_operations(n, n)
    }

    /// Creates a structure for `n` elements and `m` decrease-cost
    /// operations; `m` only influences the recursion level of the head
    /// list.
    pub fn with_operations(n: usize, m: usize) -> Self {
        let ackermann = AckermannTable::new(n as i32);
        let level = if n == 0 {
            0
        } else {
            ackermann.inverse(m as i32, n as i32)
        };
        let mut sf = Self {
            ackermann,
            links: LinkArena::default(),
            lists: Vec::new(),
            elems: Vec::with_capacity(n),
            supers: Vec::new(),
            head: 0,
            initialized: false,
        };
        sf.head = sf.alloc_list(level);
        sf
    }

    /// Number of universe elements added so far.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Appends an element with the given item and cost to the universe.
    ///
    /// # Panics
    /// Panics if called after [`initialize`](Self::initialize).
    pub fn add(&mut self, item: usize, cost: i64) -> ElementId {
        assert!(!self.initialized, "add after initialize");
        let id = self.elems.len() as u32;
        self.elems.push(ElemData {
            item: item as u32,
            cost,
            superelement: NIL,
            containing_list: NIL,
            container: NIL,
            container_singleton: NIL,
        });
        let mut chain = self.lists[self.head as usize].elements;
        let container = self.links.push_back(&mut chain, id);
        self.lists[self.head as usize].elements = chain;
        self.elems[id as usize].container = container;
        ElementId(id)
    }

    /// Partitions the whole universe into superelements, sublists and
    /// singletons, preparing the structure for `decrease_cost` and `split`.
    ///
    /// # Panics
    /// Panics if called twice.
    pub fn initialize(&mut self) {
        assert!(!self.initialized, "initialize called twice");
        self.initialized = true;
        self.initialize_full(self.head, Dir::Head);
    }

    /// Current cost of the element.
    pub fn cost(&self, x: ElementId) -> i64 {
        self.elems[x.0 as usize].cost
    }

    /// Cost of the list currently containing the element, i.e. the minimum
    /// cost over the contiguous segment of the universe the element lives
    /// in.
    pub fn list_cost(&self, x: ElementId) -> i64 {
        let elem = &self.elems[x.0 as usize];
        if elem.containing_list != NIL {
            return self.lists[elem.containing_list as usize].cost;
        }
        let se = &self.supers[elem.superelement as usize];
        if se.containing_list != NIL {
            self.lists[se.containing_list as usize].cost
        } else {
            self.top_list_cost(se.containing_sublist)
        }
    }

    /// Clamps the element's cost to `min(cost, new_cost)` and propagates
    /// the new minimum through its superelement, its sublist chain and the
    /// enclosing list. Returns the list currently containing the element.
    /// Calling with a cost no lower than the current one is a no-op.
    ///
    /// Fails with [`SsspError::InvalidArgument`] when the new cost is
    /// negative or the infinity sentinel; costs only ever decrease towards
    /// finite values.
    pub fn decrease_cost(&mut self, x: ElementId, new_cost: i64) -> Result<ListId> {
        debug_assert!(self.initialized, "decrease_cost before initialize");
        if new_cost < 0 {
            return Err(SsspError::InvalidArgument(format!(
                "cannot decrease to negative cost {new_cost}"
            )));
        }
        if new_cost == INFINITE_COST {
            return Err(SsspError::InvalidArgument(
                "cannot decrease a cost to infinity".into(),
            ));
        }
        Ok(ListId(self.decrease_cost_inner(x.0, new_cost)))
    }

    /// Splits the list containing the element into the prefix up to and
    /// including it and the remaining suffix, re-partitioning the broken
    /// superelement halves and patching the side-chains. Both halves end
    /// up with correct costs. Returns the suffix list, which is empty when
    /// the element was the last of its list.
    pub fn split(&mut self, x: ElementId) -> ListId {
        debug_assert!(self.initialized, "split before initialize");
        ListId(self.split_inner(x.0))
    }

    /// Cost of the given list.
    pub fn cost_of_list(&self, list: ListId) -> i64 {
        self.lists[list.0 as usize].cost
    }

    fn alloc_list(&mut self, level: i32) -> u32 {
        let elements = self.links.new_chain();
        let singleton_elements = self.links.new_chain();
        let singleton_supers = self.links.new_chain();
        let sublists = self.links.new_chain();
        let id = self.lists.len() as u32;
        self.lists.push(ListData {
            level,
            cost: INFINITE_COST,
            elements,
            singleton_elements,
            singleton_supers,
            sublists,
            containing_list: NIL,
            container_in_sublists: NIL,
        });
        id
    }

    fn alloc_super(&mut self, level: i32) -> u32 {
        let id = self.supers.len() as u32;
        self.supers.push(SuperData {
            level,
            first: NIL,
            last: NIL,
            cost: INFINITE_COST,
            containing_list: NIL,
            container_singleton: NIL,
            element_in_sublist: NIL,
            containing_sublist: NIL,
        });
        id
    }

    /// Allocates a sublist element wrapping a superelement.
    fn alloc_sublist_element(&mut self, sublist: u32, se: u32, dir: Dir) -> u32 {
        let id = self.elems.len() as u32;
        self.elems.push(ElemData {
            item: se,
            cost: self.supers[se as usize].cost,
            superelement: NIL,
            containing_list: NIL,
            container: NIL,
            container_singleton: NIL,
        });
        let mut chain = self.lists[sublist as usize].elements;
        let container = match dir {
            Dir::Head => self.links.push_front(&mut chain, id),
            Dir::Tail => self.links.push_back(&mut chain, id),
        };
        self.lists[sublist as usize].elements = chain;
        self.elems[id as usize].container = container;
        id
    }

    fn new_partition_out(&mut self) -> PartitionOut {
        PartitionOut {
            singleton_elements: self.links.new_chain(),
            singleton_supers: self.links.new_chain(),
            sublists: self.links.new_chain(),
        }
    }

    fn top_list_cost(&self, list: u32) -> i64 {
        let mut current = list;
        while self.lists[current as usize].containing_list != NIL {
            current = self.lists[current as usize].containing_list;
        }
        self.lists[current as usize].cost
    }

    fn elem_is_singleton(&self, x: u32) -> bool {
        let elem = &self.elems[x as usize];
        elem.containing_list != NIL
            || (elem.superelement != NIL
                && self.supers[elem.superelement as usize].containing_list != NIL)
    }

    /// Partitions a full list and computes its cost bottom-up.
    fn initialize_full(&mut self, list: u32, dir: Dir) {
        let chain = self.lists[list as usize].elements;
        let mut cost = INFINITE_COST;
        let mut size = 0i32;
        let mut current = self.links.first(chain);
        while current != NIL {
            size += 1;
            cost = cost.min(self.elems[self.links.item(current) as usize].cost);
            current = self.links.next(current);
        }
        self.lists[list as usize].cost = cost;

        let mut out = self.new_partition_out();
        if size > 0 {
            let first = self.links.first(chain);
            let last = chain.last;
            self.partition(list, dir, first, last, size, &mut out);
        }
        self.lists[list as usize].singleton_elements = out.singleton_elements;
        self.lists[list as usize].singleton_supers = out.singleton_supers;
        self.lists[list as usize].sublists = out.sublists;

        for sublist in self.links.items(out.sublists) {
            self.initialize_full(sublist, dir);
        }
    }

    /// Partitions the containers `first..=last` of `list`, collecting the
    /// produced singletons and sublists into fresh chains, and initializes
    /// the new sublists. Used by `split` to rebuild the two halves of a
    /// broken superelement.
    fn initialize_range(&mut self, list: u32, dir: Dir, first: u32, last: u32) -> PartitionOut {
        let mut size = 0i32;
        let mut current = first;
        loop {
            size += 1;
            if current == last {
                break;
            }
            current = self.links.next(current);
        }

        let mut out = self.new_partition_out();
        self.partition(list, dir, first, last, size, &mut out);
        for sublist in self.links.items(out.sublists) {
            self.initialize_full(sublist, dir);
        }
        out
    }

    /// One partitioning pass over the containers `first..=last`.
    ///
    /// Builds superelements of `2·A(i, α(i, remaining))` elements while
    /// more than three elements remain, groups equal-level runs into
    /// sublists, and records the trailing elements as leftovers. `Head`
    /// consumes from `last` leftwards, `Tail` from `first` rightwards.
    fn partition(
        &mut self,
        list: u32,
        dir: Dir,
        first: u32,
        last: u32,
        size: i32,
        out: &mut PartitionOut,
    ) {
        let list_level = self.lists[list as usize].level;
        let stop = match dir {
            Dir::Head => self.links.prev(first),
            Dir::Tail => self.links.next(last),
        };
        let mut current = match dir {
            Dir::Head => last,
            Dir::Tail => first,
        };

        let mut processed = 0i32;
        let mut supers_in_sublist = 0u32;
        let mut most_recent_super = NIL;
        let mut current_sublist = self.alloc_list(list_level - 1);

        while size - processed > 3 {
            let level = self.ackermann.inverse(list_level, size - processed);
            let count = 2 * self.ackermann.value(list_level, level);
            debug_assert!(count >= 4 && count <= size - processed);

            let se = self.alloc_super(level);
            match dir {
                Dir::Head => self.supers[se as usize].last = self.links.item(current),
                Dir::Tail => self.supers[se as usize].first = self.links.item(current),
            }
            let mut boundary = current;
            for _ in 0..count {
                let elem = self.links.item(current);
                self.elems[elem as usize].superelement = se;
                self.supers[se as usize].cost =
                    self.supers[se as usize].cost.min(self.elems[elem as usize].cost);
                boundary = current;
                current = match dir {
                    Dir::Head => self.links.prev(current),
                    Dir::Tail => self.links.next(current),
                };
            }
            match dir {
                Dir::Head => self.supers[se as usize].first = self.links.item(boundary),
                Dir::Tail => self.supers[se as usize].last = self.links.item(boundary),
            }

            if most_recent_super != NIL && self.supers[most_recent_super as usize].level != level {
                self.flush_group(
                    list,
                    dir,
                    out,
                    current_sublist,
                    most_recent_super,
                    supers_in_sublist,
                );
                current_sublist = self.alloc_list(list_level - 1);
                supers_in_sublist = 0;
            }

            let sublist_elem = self.alloc_sublist_element(current_sublist, se, dir);
            self.supers[se as usize].element_in_sublist = sublist_elem;
            self.supers[se as usize].containing_sublist = current_sublist;
            supers_in_sublist += 1;

            processed += count;
            most_recent_super = se;
        }

        if most_recent_super != NIL {
            self.flush_group(
                list,
                dir,
                out,
                current_sublist,
                most_recent_super,
                supers_in_sublist,
            );
        }

        // trailing elements become loose leftovers of the list
        while current != stop {
            let elem = self.links.item(current);
            let mut chain = out.singleton_elements;
            let container = match dir {
                Dir::Head => self.links.push_front(&mut chain, elem),
                Dir::Tail => self.links.push_back(&mut chain, elem),
            };
            out.singleton_elements = chain;
            self.elems[elem as usize].container_singleton = container;
            self.elems[elem as usize].containing_list = list;
            self.elems[elem as usize].superelement = NIL;
            current = match dir {
                Dir::Head => self.links.prev(current),
                Dir::Tail => self.links.next(current),
            };
        }
    }

    /// Commits a finished run of equal-level superelements: a proper
    /// sublist when the run has at least two members, a singleton
    /// superelement otherwise.
    fn flush_group(
        &mut self,
        list: u32,
        dir: Dir,
        out: &mut PartitionOut,
        sublist: u32,
        most_recent_super: u32,
        supers_in_sublist: u32,
    ) {
        if supers_in_sublist > 1 {
            let mut chain = out.sublists;
            let container = match dir {
                Dir::Head => self.links.push_front(&mut chain, sublist),
                Dir::Tail => self.links.push_back(&mut chain, sublist),
            };
            out.sublists = chain;
            self.lists[sublist as usize].container_in_sublists = container;
            self.lists[sublist as usize].containing_list = list;
        } else {
            let mut chain = out.singleton_supers;
            let container = match dir {
                Dir::Head => self.links.push_front(&mut chain, most_recent_super),
                Dir::Tail => self.links.push_back(&mut chain, most_recent_super),
            };
            out.singleton_supers = chain;
            let se = &mut self.supers[most_recent_super as usize];
            se.container_singleton = container;
            se.containing_list = list;
            se.element_in_sublist = NIL;
            se.containing_sublist = NIL;
        }
    }

    fn decrease_cost_inner(&mut self, x: u32, new_cost: i64) -> u32 {
        if self.elem_is_singleton(x) {
            let elem = &mut self.elems[x as usize];
            elem.cost = elem.cost.min(new_cost);
            let se = elem.superelement;
            if se != NIL {
                // inside a singleton superelement
                let se = &mut self.supers[se as usize];
                se.cost = se.cost.min(new_cost);
                let list = se.containing_list;
                let list_data = &mut self.lists[list as usize];
                list_data.cost = list_data.cost.min(new_cost);
                list
            } else {
                // a loose leftover
                let list = self.elems[x as usize].containing_list;
                let list_data = &mut self.lists[list as usize];
                list_data.cost = list_data.cost.min(new_cost);
                list
            }
        } else {
            // inside a superelement held by a sublist: recurse one level
            // down through the sublist element, then lift the minimum into
            // the enclosing list
            let se = self.elems[x as usize].superelement;
            let sublist_elem = self.supers[se as usize].element_in_sublist;
            let sublist = self.decrease_cost_inner(sublist_elem, new_cost);
            self.supers[se as usize].cost = self.supers[se as usize].cost.min(new_cost);
            self.elems[x as usize].cost = self.elems[x as usize].cost.min(new_cost);
            let list = self.lists[sublist as usize].containing_list;
            let list_data = &mut self.lists[list as usize];
            list_data.cost = list_data.cost.min(new_cost);
            list
        }
    }

    /// Last loose leftover strictly in front of `container` in the element
    /// chain of `list`.
    fn prev_leftover(&self, list: u32, container: u32) -> Option<u32> {
        let sentinel = self.lists[list as usize].elements.sentinel;
        let mut current = self.links.prev(container);
        while current != sentinel {
            let elem = self.links.item(current);
            let data = &self.elems[elem as usize];
            if data.containing_list != NIL && data.superelement == NIL {
                return Some(elem);
            }
            current = self.links.prev(current);
        }
        None
    }

    /// Last singleton superelement strictly in front of `container`.
    fn prev_singleton_super(&self, list: u32, container: u32) -> Option<u32> {
        let sentinel = self.lists[list as usize].elements.sentinel;
        let mut current = self.links.prev(container);
        while current != sentinel {
            let se = self.elems[self.links.item(current) as usize].superelement;
            if se != NIL && self.supers[se as usize].containing_list != NIL {
                return Some(se);
            }
            current = self.links.prev(current);
        }
        None
    }

    /// Last proper sublist strictly in front of `container`.
    fn prev_sublist(&self, list: u32, container: u32) -> Option<u32> {
        let sentinel = self.lists[list as usize].elements.sentinel;
        let mut current = self.links.prev(container);
        while current != sentinel {
            let se = self.elems[self.links.item(current) as usize].superelement;
            if se != NIL && self.supers[se as usize].containing_list == NIL {
                return Some(self.supers[se as usize].containing_sublist);
            }
            current = self.links.prev(current);
        }
        None
    }

    fn split_inner(&mut self, x: u32) -> u32 {
        let container_x = self.elems[x as usize].container;
        let l1;
        let l2;

        if self.elem_is_singleton(x) {
            let se = self.elems[x as usize].superelement;
            if se == NIL {
                // a loose leftover
                l1 = self.elems[x as usize].containing_list;
                l2 = self.alloc_list(self.lists[l1 as usize].level);

                let mut chain = self.lists[l1 as usize].singleton_elements;
                let cut = self
                    .links
                    .cut_after(&mut chain, self.elems[x as usize].container_singleton);
                self.lists[l1 as usize].singleton_elements = chain;
                self.lists[l2 as usize].singleton_elements = cut;

                match self.prev_singleton_super(l1, container_x) {
                    Some(prev_se) => {
                        let mut chain = self.lists[l1 as usize].singleton_supers;
                        let cut = self.links.cut_after(
                            &mut chain,
                            self.supers[prev_se as usize].container_singleton,
                        );
                        self.lists[l1 as usize].singleton_supers = chain;
                        self.lists[l2 as usize].singleton_supers = cut;
                    }
                    None => {
                        self.lists[l2 as usize].singleton_supers =
                            self.lists[l1 as usize].singleton_supers;
                        self.lists[l1 as usize].singleton_supers = self.links.new_chain();
                    }
                }

                match self.prev_sublist(l1, container_x) {
                    Some(prev_sub) => {
                        let mut chain = self.lists[l1 as usize].sublists;
                        let cut = self.links.cut_after(
                            &mut chain,
                            self.lists[prev_sub as usize].container_in_sublists,
                        );
                        self.lists[l1 as usize].sublists = chain;
                        self.lists[l2 as usize].sublists = cut;
                    }
                    None => {
                        self.lists[l2 as usize].sublists = self.lists[l1 as usize].sublists;
                        self.lists[l1 as usize].sublists = self.links.new_chain();
                    }
                }
            } else {
                // inside a singleton superelement
                l1 = self.supers[se as usize].containing_list;
                l2 = self.alloc_list(self.lists[l1 as usize].level);

                if x == self.supers[se as usize].last {
                    // the superelement stays intact on the left side
                    match self.prev_leftover(l1, container_x) {
                        Some(prev_elem) => {
                            let mut chain = self.lists[l1 as usize].singleton_elements;
                            let cut = self.links.cut_after(
                                &mut chain,
                                self.elems[prev_elem as usize].container_singleton,
                            );
                            self.lists[l1 as usize].singleton_elements = chain;
                            self.lists[l2 as usize].singleton_elements = cut;
                        }
                        None => {
                            self.lists[l2 as usize].singleton_elements =
                                self.lists[l1 as usize].singleton_elements;
                            self.lists[l1 as usize].singleton_elements = self.links.new_chain();
                        }
                    }

                    let mut chain = self.lists[l1 as usize].singleton_supers;
                    let cut = self
                        .links
                        .cut_after(&mut chain, self.supers[se as usize].container_singleton);
                    self.lists[l1 as usize].singleton_supers = chain;
                    self.lists[l2 as usize].singleton_supers = cut;

                    match self.prev_sublist(l1, container_x) {
                        Some(prev_sub) => {
                            let mut chain = self.lists[l1 as usize].sublists;
                            let cut = self.links.cut_after(
                                &mut chain,
                                self.lists[prev_sub as usize].container_in_sublists,
                            );
                            self.lists[l1 as usize].sublists = chain;
                            self.lists[l2 as usize].sublists = cut;
                        }
                        None => {
                            self.lists[l2 as usize].sublists = self.lists[l1 as usize].sublists;
                            self.lists[l1 as usize].sublists = self.links.new_chain();
                        }
                    }
                } else {
                    self.split_mid_singleton_super(l1, l2, x, se);
                }
            }
        } else {
            // inside a superelement held by a sublist
            let se = self.elems[x as usize].superelement;
            let orig_sublist = self.supers[se as usize].containing_sublist;
            l1 = self.lists[orig_sublist as usize].containing_list;
            l2 = self.alloc_list(self.lists[l1 as usize].level);

            let mut insert_after = self.lists[orig_sublist as usize].container_in_sublists;

            // split the sublist one level down after e(x)
            let ex_elem = self.supers[se as usize].element_in_sublist;
            let subl3 = self.split_inner(ex_elem);
            for elem in self.links.items(self.lists[subl3 as usize].elements) {
                let held = self.elems[elem as usize].item;
                self.supers[held as usize].containing_sublist = subl3;
            }

            // and once more so that {e(x)} becomes a list of its own
            let mut subl2 = NIL;
            let pred = self.links.prev(self.elems[ex_elem as usize].container);
            if self.links.item(pred) != NIL {
                subl2 = self.split_inner(self.links.item(pred));
                for elem in self.links.items(self.lists[subl2 as usize].elements) {
                    let held = self.elems[elem as usize].item;
                    self.supers[held as usize].containing_sublist = subl2;
                }
            }

            if subl2 != NIL {
                let mut chain = self.lists[l1 as usize].sublists;
                insert_after = self.links.insert_after(&mut chain, insert_after, subl2);
                self.lists[l1 as usize].sublists = chain;
                self.lists[subl2 as usize].container_in_sublists = insert_after;
                self.lists[subl2 as usize].containing_list = l1;
            }
            {
                let mut chain = self.lists[l1 as usize].sublists;
                insert_after = self.links.insert_after(&mut chain, insert_after, subl3);
                self.lists[l1 as usize].sublists = chain;
                self.lists[subl3 as usize].container_in_sublists = insert_after;
                self.lists[subl3 as usize].containing_list = l1;
            }

            if x == self.supers[se as usize].last {
                // e(x) stays intact on the left side
                match self.prev_leftover(l1, container_x) {
                    Some(prev_elem) => {
                        let mut chain = self.lists[l1 as usize].singleton_elements;
                        let cut = self.links.cut_after(
                            &mut chain,
                            self.elems[prev_elem as usize].container_singleton,
                        );
                        self.lists[l1 as usize].singleton_elements = chain;
                        self.lists[l2 as usize].singleton_elements = cut;
                    }
                    None => {
                        self.lists[l2 as usize].singleton_elements =
                            self.lists[l1 as usize].singleton_elements;
                        self.lists[l1 as usize].singleton_elements = self.links.new_chain();
                    }
                }

                match self.prev_singleton_super(l1, container_x) {
                    Some(prev_se) => {
                        let mut chain = self.lists[l1 as usize].singleton_supers;
                        let cut = self.links.cut_after(
                            &mut chain,
                            self.supers[prev_se as usize].container_singleton,
                        );
                        self.lists[l1 as usize].singleton_supers = chain;
                        self.lists[l2 as usize].singleton_supers = cut;
                    }
                    None => {
                        self.lists[l2 as usize].singleton_supers =
                            self.lists[l1 as usize].singleton_supers;
                        self.lists[l1 as usize].singleton_supers = self.links.new_chain();
                    }
                }

                let cut_position = if subl2 != NIL {
                    self.lists[subl2 as usize].container_in_sublists
                } else {
                    let sublist = self.supers[se as usize].containing_sublist;
                    self.lists[sublist as usize].container_in_sublists
                };
                let mut chain = self.lists[l1 as usize].sublists;
                let cut = self.links.cut_after(&mut chain, cut_position);
                self.lists[l1 as usize].sublists = chain;
                self.lists[l2 as usize].sublists = cut;
            } else {
                let last_singleton_elem = match self.prev_leftover(l1, container_x) {
                    Some(prev_elem) => self.elems[prev_elem as usize].container_singleton,
                    None => self.lists[l1 as usize].singleton_elements.sentinel,
                };
                let last_singleton_super = match self.prev_singleton_super(l1, container_x) {
                    Some(prev_se) => self.supers[prev_se as usize].container_singleton,
                    None => self.lists[l1 as usize].singleton_supers.sentinel,
                };
                let ex_sublist = self.supers[se as usize].containing_sublist;
                let last_sublist =
                    self.links
                        .prev(self.lists[ex_sublist as usize].container_in_sublists);

                self.rebuild_broken_superelement(
                    l1,
                    l2,
                    x,
                    se,
                    last_singleton_elem,
                    last_singleton_super,
                    last_sublist,
                );

                // the {e(x)} wrapper list carries no elements of l2 anymore
                let mut chain = self.lists[l2 as usize].sublists;
                let first = self.links.first(chain);
                let rest = self.links.cut_after(&mut chain, first);
                self.lists[l2 as usize].sublists = rest;
            }
        }

        // move the suffix of the element chain over to l2
        let mut chain = self.lists[l1 as usize].elements;
        let cut = self.links.cut_after(&mut chain, container_x);
        self.lists[l1 as usize].elements = chain;
        self.lists[l2 as usize].elements = cut;

        self.lists[l2 as usize].containing_list = self.lists[l1 as usize].containing_list;

        self.recompute_costs_after_split(l1, l2);
        l2
    }

    /// Mid-superelement split of a singleton superelement: remove it from
    /// the side-chain, then rebuild both halves.
    fn split_mid_singleton_super(&mut self, l1: u32, l2: u32, x: u32, se: u32) {
        let container_x = self.elems[x as usize].container;
        let last_singleton_elem = match self.prev_leftover(l1, container_x) {
            Some(prev_elem) => self.elems[prev_elem as usize].container_singleton,
            None => self.lists[l1 as usize].singleton_elements.sentinel,
        };
        let last_sublist = match self.prev_sublist(l1, container_x) {
            Some(prev_sub) => self.lists[prev_sub as usize].container_in_sublists,
            None => self.lists[l1 as usize].sublists.sentinel,
        };

        let mut chain = self.lists[l1 as usize].singleton_supers;
        let last_singleton_super = self
            .links
            .remove(&mut chain, self.supers[se as usize].container_singleton);
        self.lists[l1 as usize].singleton_supers = chain;

        self.rebuild_broken_superelement(
            l1,
            l2,
            x,
            se,
            last_singleton_elem,
            last_singleton_super,
            last_sublist,
        );
    }

    /// Re-runs initialize-head on the members of `se` up to and including
    /// `x`, splicing the produced singletons and sublists into l1's
    /// side-chains after the given anchors, cuts everything behind the
    /// splice points over to l2, then re-runs initialize-tail on the
    /// remaining members and prepends the result to l2's side-chains.
    #[allow(clippy::too_many_arguments)]
    fn rebuild_broken_superelement(
        &mut self,
        l1: u32,
        l2: u32,
        x: u32,
        se: u32,
        last_singleton_elem: u32,
        last_singleton_super: u32,
        last_sublist: u32,
    ) {
        let container_x = self.elems[x as usize].container;
        let old_first = self.supers[se as usize].first;
        let old_last = self.supers[se as usize].last;

        let head_out = self.initialize_range(
            l1,
            Dir::Head,
            self.elems[old_first as usize].container,
            container_x,
        );

        let mut chain = self.lists[l1 as usize].singleton_elements;
        let anchor_elems =
            self.links
                .splice_after(&mut chain, last_singleton_elem, head_out.singleton_elements);
        self.lists[l1 as usize].singleton_elements = chain;

        let mut chain = self.lists[l1 as usize].singleton_supers;
        let anchor_supers =
            self.links
                .splice_after(&mut chain, last_singleton_super, head_out.singleton_supers);
        self.lists[l1 as usize].singleton_supers = chain;

        let mut chain = self.lists[l1 as usize].sublists;
        let anchor_sublists = self
            .links
            .splice_after(&mut chain, last_sublist, head_out.sublists);
        self.lists[l1 as usize].sublists = chain;

        let mut chain = self.lists[l1 as usize].singleton_elements;
        let cut = self.links.cut_after(&mut chain, anchor_elems);
        self.lists[l1 as usize].singleton_elements = chain;
        self.lists[l2 as usize].singleton_elements = cut;

        let mut chain = self.lists[l1 as usize].singleton_supers;
        let cut = self.links.cut_after(&mut chain, anchor_supers);
        self.lists[l1 as usize].singleton_supers = chain;
        self.lists[l2 as usize].singleton_supers = cut;

        let mut chain = self.lists[l1 as usize].sublists;
        let cut = self.links.cut_after(&mut chain, anchor_sublists);
        self.lists[l1 as usize].sublists = chain;
        self.lists[l2 as usize].sublists = cut;

        let tail_out = self.initialize_range(
            l1,
            Dir::Tail,
            self.links.next(container_x),
            self.elems[old_last as usize].container,
        );

        let mut chain = tail_out.singleton_elements;
        self.links
            .concat(&mut chain, self.lists[l2 as usize].singleton_elements);
        self.lists[l2 as usize].singleton_elements = chain;

        let mut chain = tail_out.singleton_supers;
        self.links
            .concat(&mut chain, self.lists[l2 as usize].singleton_supers);
        self.lists[l2 as usize].singleton_supers = chain;

        let mut chain = tail_out.sublists;
        self.links.concat(&mut chain, self.lists[l2 as usize].sublists);
        self.lists[l2 as usize].sublists = chain;
    }

    /// Recomputes both list costs by scanning their side-chains and points
    /// every member of l2 at its new list.
    fn recompute_costs_after_split(&mut self, l1: u32, l2: u32) {
        let mut cost = INFINITE_COST;
        for elem in self.links.items(self.lists[l1 as usize].singleton_elements) {
            cost = cost.min(self.elems[elem as usize].cost);
        }
        for se in self.links.items(self.lists[l1 as usize].singleton_supers) {
            cost = cost.min(self.supers[se as usize].cost);
        }
        for sublist in self.links.items(self.lists[l1 as usize].sublists) {
            cost = cost.min(self.lists[sublist as usize].cost);
        }
        self.lists[l1 as usize].cost = cost;

        let mut cost = INFINITE_COST;
        for elem in self.links.items(self.lists[l2 as usize].singleton_elements) {
            self.elems[elem as usize].containing_list = l2;
            cost = cost.min(self.elems[elem as usize].cost);
        }
        for se in self.links.items(self.lists[l2 as usize].singleton_supers) {
            self.supers[se as usize].containing_list = l2;
            cost = cost.min(self.supers[se as usize].cost);
        }
        for sublist in self.links.items(self.lists[l2 as usize].sublists) {
            self.deep_set_containing(sublist, l2);
            cost = cost.min(self.lists[sublist as usize].cost);
        }
        self.lists[l2 as usize].cost = cost;
    }

    fn deep_set_containing(&mut self, sublist: u32, containing: u32) {
        self.lists[sublist as usize].containing_list = containing;
        for inner in self.links.items(self.lists[sublist as usize].sublists) {
            self.deep_set_containing(inner, sublist);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SplitFindmin, INFINITE_COST};

    fn build(costs: &[i64]) -> (SplitFindmin, Vec<super::ElementId>) {
        let mut sf = SplitFindmin::new(costs.len());
        let handles: Vec<_> = costs
            .iter()
            .enumerate()
            .map(|(i, &c)| sf.add(i, c))
            .collect();
        sf.initialize();
        (sf, handles)
    }

    #[test]
    fn initialize_computes_minimum() {
        let costs = [9, 4, 7, 3, 8, 6, 5, 2, 10, 11];
        let (sf, handles) = build(&costs);
        for &h in &handles {
            assert_eq!(sf.list_cost(h), 2);
        }
        assert_eq!(sf.cost(handles[0]), 9);
        assert_eq!(sf.cost(handles[7]), 2);
    }

    #[test]
    fn decrease_cost_propagates_to_list() {
        let costs = [9, 4, 7, 3, 8, 6, 5, 12, 10, 11];
        let (mut sf, handles) = build(&costs);
        assert_eq!(sf.list_cost(handles[9]), 3);
        sf.decrease_cost(handles[8], 1).unwrap();
        assert_eq!(sf.cost(handles[8]), 1);
        assert_eq!(sf.list_cost(handles[0]), 1);
    }

    #[test]
    fn decrease_with_larger_cost_is_noop() {
        let costs = [5, 6, 7, 8, 9];
        let (mut sf, handles) = build(&costs);
        sf.decrease_cost(handles[2], 100).unwrap();
        assert_eq!(sf.cost(handles[2]), 7);
        assert_eq!(sf.list_cost(handles[2]), 5);
    }

    #[test]
    fn rejects_out_of_domain_costs() {
        let (mut sf, handles) = build(&[5, 6, 7]);
        assert!(sf.decrease_cost(handles[0], -1).is_err());
        assert!(sf.decrease_cost(handles[0], INFINITE_COST).is_err());
        // the failed calls left the costs untouched
        assert_eq!(sf.cost(handles[0]), 5);
        assert_eq!(sf.list_cost(handles[0]), 5);
    }

    #[test]
    fn infinite_universe_reports_infinity() {
        let (sf, handles) = build(&[INFINITE_COST; 6]);
        assert_eq!(sf.list_cost(handles[3]), INFINITE_COST);
    }

    #[test]
    fn split_separates_minima() {
        // split between positions 4 and 5 at every starting size
        for n in 2..40usize {
            let costs: Vec<i64> = (0..n).map(|i| 100 + ((i * 7) % 31) as i64).collect();
            let (mut sf, handles) = build(&costs);
            let at = (n - 1) / 2;
            sf.split(handles[at]);
            let left_min = *costs[..=at].iter().min().unwrap();
            let right_min = costs[at + 1..].iter().min().copied();
            for (i, &h) in handles.iter().enumerate() {
                let expected = if i <= at {
                    left_min
                } else {
                    right_min.unwrap()
                };
                assert_eq!(sf.list_cost(h), expected, "n={n} at={at} i={i}");
            }
        }
    }

    #[test]
    fn split_every_position_once() {
        let n = 24usize;
        for at in 0..n {
            let costs: Vec<i64> = (0..n).map(|i| 50 + ((i * 13) % 17) as i64).collect();
            let (mut sf, handles) = build(&costs);
            sf.split(handles[at]);
            let left_min = *costs[..=at].iter().min().unwrap();
            for (i, &h) in handles.iter().enumerate() {
                let expected = if i <= at {
                    left_min
                } else {
                    *costs[at + 1..].iter().min().unwrap()
                };
                assert_eq!(sf.list_cost(h), expected, "at={at} i={i}");
            }
        }
    }

    #[test]
    fn repeated_splits_into_singletons() {
        let n = 16usize;
        let costs: Vec<i64> = (0..n).map(|i| (i as i64) * 3 + 1).collect();
        let (mut sf, handles) = build(&costs);
        for &h in handles.iter() {
            sf.split(h);
        }
        for (i, &h) in handles.iter().enumerate() {
            assert_eq!(sf.list_cost(h), costs[i]);
        }
    }

    #[test]
    fn decrease_after_split_stays_local() {
        let n = 20usize;
        let costs: Vec<i64> = vec![1000; n];
        let (mut sf, handles) = build(&costs);
        sf.split(handles[9]);
        sf.decrease_cost(handles[3], 5).unwrap();
        sf.decrease_cost(handles[15], 7).unwrap();
        assert_eq!(sf.list_cost(handles[0]), 5);
        assert_eq!(sf.list_cost(handles[9]), 5);
        assert_eq!(sf.list_cost(handles[10]), 7);
        assert_eq!(sf.list_cost(handles[19]), 7);
    }

    #[test]
    fn split_last_element_leaves_empty_suffix() {
        let costs = [4, 3, 8, 1, 6];
        let (mut sf, handles) = build(&costs);
        let suffix = sf.split(handles[4]);
        assert_eq!(sf.cost_of_list(suffix), INFINITE_COST);
        assert_eq!(sf.list_cost(handles[0]), 1);
    }
}
