use proptest::prelude::*;

use super::*;

type List<T> = ArrayIndexedCollection<T>;

// Defines an arbitrary collection containing elements from -10000 to 10000
fn collection_strategy() -> impl Strategy<Value = List<isize>> {
    prop::collection::vec(-10000..10000isize, 0..1000).prop_map(|x| x.into_iter().collect())
}

// Generate arbitrary sequence of manipulations to both a vector and a collection
// Apply those manipulations in order, then check that the state of both is the same
// If the state of the resulting is the same AND the storage invariants hold, we're good
#[derive(Debug, Clone)]
enum Action {
    Add(usize),
    Insert(usize, usize),
    RemoveAt(usize),
    Remove(usize),
    AddAll(Vec<usize>),
    Clear,
}

impl Action {
    fn act_on_vector(self, mut vec: Vec<usize>) -> Vec<usize> {
        match self {
            Action::Add(value) => {
                vec.push(value);
                vec
            }
            Action::Insert(value, position) => {
                if position <= vec.len() {
                    vec.insert(position, value);
                }
                vec
            }
            Action::RemoveAt(index) => {
                if index < vec.len() {
                    vec.remove(index);
                }
                vec
            }
            Action::Remove(value) => {
                if let Some(index) = vec.iter().position(|x| *x == value) {
                    vec.remove(index);
                }
                vec
            }
            Action::AddAll(mut right) => {
                vec.append(&mut right);
                vec
            }
            Action::Clear => {
                vec.clear();
                vec
            }
        }
    }

    fn act_on_collection(self, mut collection: List<usize>) -> List<usize> {
        let size = collection.size();
        match self {
            Action::Add(value) => collection.add(value),
            Action::Insert(value, position) => {
                assert_eq!(collection.insert(value, position).is_ok(), position <= size);
            }
            Action::RemoveAt(index) => {
                assert_eq!(collection.remove_at(index).is_ok(), index < size);
            }
            Action::Remove(value) => {
                let present = collection.contains(&value);
                assert_eq!(collection.remove(&value), present);
            }
            Action::AddAll(right) => {
                let right: List<usize> = right.into();
                Collection::add_all(&mut collection, &right).unwrap();
            }
            Action::Clear => collection.clear(),
        }
        collection
    }
}

fn crunch_actions_for_vec(initial: Vec<usize>, actions: Vec<Action>) -> Vec<usize> {
    actions
        .into_iter()
        .fold(initial, |vec, action| action.act_on_vector(vec))
}

fn crunch_actions_for_collection(initial: List<usize>, actions: Vec<Action>) -> List<usize> {
    actions.into_iter().fold(initial, |collection, action| {
        let res = action.act_on_collection(collection);
        res.assert_invariants();
        res
    })
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..100usize).prop_map(Action::Add),
        (0..100usize, 0..300usize).prop_map(|(value, position)| Action::Insert(value, position)),
        (0..300usize).prop_map(Action::RemoveAt),
        (0..100usize).prop_map(Action::Remove),
        prop::collection::vec(0..100usize, 0..100).prop_map(Action::AddAll),
        Just(Action::Clear)
    ]
}

fn actions_strategy() -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(action_strategy(), 0..50)
}

fn vec_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..100usize, 0..256)
}

fn random_test_runner(vec: Vec<usize>, actions: Vec<Action>) {
    let collection: List<usize> = vec.clone().into();

    let expected = crunch_actions_for_vec(vec, actions.clone());
    let collection = crunch_actions_for_collection(collection, actions);

    assert_eq!(collection.to_array(), expected);
    assert_eq!(collection.size(), expected.len());
}

proptest! {
    #[test]
    fn operations_in_order_match(vec in vec_strategy(), actions in actions_strategy()) {
        random_test_runner(vec, actions);
    }

    #[test]
    fn indexing_correctly_lines_up(size in 0..2000usize) {
        let mut collection = List::with_capacity(1).unwrap();
        for i in 0..size {
            collection.add(i);
        }
        for i in 0..size {
            assert_eq!(collection.get(i), Ok(i));
        }
        assert!(collection.get(size).is_err());
    }

    #[test]
    fn capacity_is_power_of_two_multiple(initial in 1..64usize, count in 0..1000usize) {
        let mut collection = List::with_capacity(initial).unwrap();
        for i in 0..count {
            collection.add(i);
        }
        let capacity = collection.capacity();
        assert!(capacity >= count);
        assert_eq!(capacity % initial, 0);
        assert!((capacity / initial).is_power_of_two());
        // Never more than one doubling beyond what was needed
        assert!(count <= initial || capacity < 2 * count);
    }

    #[test]
    fn to_array_length_equals_size(collection in collection_strategy()) {
        let values = collection.to_array();
        assert_eq!(values.len(), collection.size());
        assert!(Iterator::eq(values.into_iter(), collection.iter()));
    }

    #[test]
    fn getter_matches_iter(collection in collection_strategy()) {
        let mut getter = collection.create_elements_getter();
        let mut from_getter = Vec::new();
        while getter.has_next_element().unwrap() {
            from_getter.push(getter.get_next_element().unwrap());
        }
        assert!(Iterator::eq(from_getter.into_iter(), collection.iter()));
    }

    #[test]
    fn remove_then_insert_restores(collection in collection_strategy(), index in 0..1000usize) {
        let mut collection = collection;
        prop_assume!(index < collection.size());
        let before = collection.to_array();
        let old = collection.remove_at(index).unwrap();
        collection.insert(old, index).unwrap();
        assert_eq!(collection.to_array(), before);
    }

    #[test]
    fn index_of_finds_first(collection in collection_strategy(), value in -10000..10000isize) {
        let values = collection.to_array();
        assert_eq!(collection.index_of(&value), values.iter().position(|x| *x == value));
        assert_eq!(collection.contains(&value), values.contains(&value));
    }

    #[test]
    fn add_all_resulting_length_equivalent(left in collection_strategy(), right in collection_strategy()) {
        let mut left = left;
        let left_length = left.size();
        let right_length = right.size();

        Collection::add_all(&mut left, &right).unwrap();

        left.assert_invariants();
        assert_eq!(left.size(), left_length + right_length);
        assert_eq!(right.size(), right_length);
    }
}
