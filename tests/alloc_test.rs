use linked_deque::alloc::{AllocError, Budget, Global, NodeAlloc};
use linked_deque::{LinkedDeque, NodeBox};
use std::alloc::Layout;

#[test]
fn test_node_box_release() {
    let budget = Budget::new(2);
    let node = NodeBox::try_new_in(String::from("node"), budget.clone()).unwrap();
    assert_eq!(node.len(), 4);
    assert_eq!(budget.live(), 1);
    assert!(node.allocator().same_budget(&budget));

    drop(node);
    assert_eq!(budget.live(), 0);

    let node = NodeBox::try_new_in(7u32, budget.clone()).unwrap();
    assert_eq!(node.into_inner(), 7);
    assert_eq!(budget.live(), 0);

    assert_eq!(
        NodeBox::try_new_in(8u32, budget.clone()).map(NodeBox::into_inner),
        Err(AllocError)
    );
}

#[test]
fn test_node_box_data_mut() {
    let mut node = NodeBox::new(vec![1, 2]);
    node.data_mut().push(3);
    node.push(4);
    assert_eq!(node.data(), &vec![1, 2, 3, 4]);
    assert_eq!(format!("{node:?}"), "NodeBox([1, 2, 3, 4])");
}

#[test]
fn test_nodes_move_between_deques_without_allocating() {
    let budget = Budget::new(4);
    let mut a = LinkedDeque::new_in(budget.clone());
    let mut b = LinkedDeque::new_in(budget.clone());
    for i in 0..4 {
        a.append(i).unwrap();
    }

    while let Some(node) = a.pop_node() {
        b.append_node(node);
    }
    assert_eq!(budget.allocations(), 4);
    assert_eq!(budget.live(), 4);
    assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);

    drop(b);
    assert_eq!(budget.live(), 0);
}

#[test]
fn test_custom_allocator_is_used() {
    #[derive(Clone, Default)]
    struct Refusing;

    impl NodeAlloc for Refusing {
        fn allocate(&self, _layout: Layout) -> Result<std::ptr::NonNull<u8>, AllocError> {
            Err(AllocError)
        }

        unsafe fn deallocate(&self, ptr: std::ptr::NonNull<u8>, layout: Layout) {
            Global.deallocate(ptr, layout);
        }
    }

    let mut deque: LinkedDeque<u8, Refusing> = LinkedDeque::default();
    assert_eq!(deque.push(1), Err(AllocError));
    assert_eq!(deque.append(1), Err(AllocError));
    assert_eq!(deque.try_extend([1, 2, 3]), Err(AllocError));
    assert!(deque.is_empty());
    assert!(deque.try_clone().unwrap().is_empty());
}

#[test]
fn test_alloc_error_is_std_error() {
    fn fill(deque: &mut LinkedDeque<u8, Budget>) -> Result<(), Box<dyn std::error::Error>> {
        for i in 0..10 {
            deque.append(i)?;
        }
        Ok(())
    }

    let mut deque = LinkedDeque::new_in(Budget::new(5));
    let err = fill(&mut deque).unwrap_err();
    assert_eq!(err.to_string(), "memory allocation failed");
    assert_eq!(deque.len(), 5);
}
