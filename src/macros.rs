// Behaviour every `Collection` implementation has to share. The tests only go through
// `&dyn Collection`, so they exercise the trait rather than inherent shortcuts.
#[cfg(test)]
macro_rules! collection_contract_tests {
    ($mod_name:tt, $type:tt, $collection_macro:tt) => {
        use crate::$collection_macro;
        use crate::collection::Collection;
        use crate::error::CollectionError;

        fn contents(collection: &dyn Collection<usize>) -> Vec<usize> {
            let mut seen = Vec::new();
            collection
                .for_each(&mut |value: usize| seen.push(value))
                .unwrap();
            seen
        }

        #[test]
        fn size_and_is_empty() {
            let mut collection: $type<usize> = $type::new();
            let dynamic: &mut dyn Collection<usize> = &mut collection;
            assert!(dynamic.is_empty());
            assert_eq!(dynamic.size(), 0);

            dynamic.add(10);
            dynamic.add(20);
            assert!(!dynamic.is_empty());
            assert_eq!(dynamic.size(), 2);
        }

        #[test]
        fn add_preserves_order() {
            let mut collection: $type<usize> = $type::new();
            let dynamic: &mut dyn Collection<usize> = &mut collection;
            for i in 0..100 {
                dynamic.add(i);
            }
            assert_eq!(dynamic.to_array(), (0..100).collect::<Vec<_>>());
        }

        #[test]
        fn contains() {
            let collection: $type<usize> = $collection_macro![1, 2, 3];
            let dynamic: &dyn Collection<usize> = &collection;
            assert!(dynamic.contains(&2));
            assert!(!dynamic.contains(&5));
        }

        #[test]
        fn remove() {
            let mut collection: $type<usize> = $collection_macro![1, 2, 3, 2];
            let dynamic: &mut dyn Collection<usize> = &mut collection;
            assert!(dynamic.remove(&2));
            assert_eq!(dynamic.size(), 3);
            assert!(dynamic.contains(&2));
            assert!(dynamic.remove(&2));
            assert!(!dynamic.remove(&2));
            assert_eq!(dynamic.to_array(), vec![1, 3]);
        }

        #[test]
        fn to_array_length_matches_size() {
            let collection: $type<usize> = $collection_macro![5, 6, 7, 8];
            let dynamic: &dyn Collection<usize> = &collection;
            assert_eq!(dynamic.to_array().len(), dynamic.size());
        }

        #[test]
        fn clear() {
            let mut collection: $type<usize> = $collection_macro![1, 2, 3];
            let dynamic: &mut dyn Collection<usize> = &mut collection;
            dynamic.clear();
            assert!(dynamic.is_empty());
            assert!(dynamic.to_array().is_empty());
            dynamic.add(4);
            assert_eq!(dynamic.to_array(), vec![4]);
        }

        #[test]
        fn for_each() {
            let collection: $type<usize> = $collection_macro![3, 1, 2];
            assert_eq!(contents(&collection), vec![3, 1, 2]);
        }

        #[test]
        fn elements_getter() {
            let collection: $type<usize> = $collection_macro![1, 2];
            let dynamic: &dyn Collection<usize> = &collection;
            let mut getter = dynamic.create_elements_getter();
            assert_eq!(getter.has_next_element(), Ok(true));
            assert_eq!(getter.get_next_element(), Ok(1));
            assert_eq!(getter.get_next_element(), Ok(2));
            assert_eq!(getter.has_next_element(), Ok(false));
            assert_eq!(getter.get_next_element(), Err(CollectionError::NoSuchElement));
        }

        #[test]
        fn add_all() {
            let mut left: $type<usize> = $collection_macro![1, 2, 3];
            let right: $type<usize> = $collection_macro![4, 5, 6];
            let dynamic: &mut dyn Collection<usize> = &mut left;
            dynamic.add_all(&right).unwrap();
            assert_eq!(contents(&left), vec![1, 2, 3, 4, 5, 6]);
            assert_eq!(contents(&right), vec![4, 5, 6]);
        }

        #[test]
        fn add_all_satisfying() {
            let mut target: $type<usize> = $collection_macro![100];
            let source: $type<usize> = (0..10).collect();
            let dynamic: &mut dyn Collection<usize> = &mut target;
            dynamic
                .add_all_satisfying(&source, &|value: &usize| value % 3 == 0)
                .unwrap();
            assert_eq!(contents(&target), vec![100, 0, 3, 6, 9]);
            assert_eq!(source.size(), 10);
        }
    };
}
