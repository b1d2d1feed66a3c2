use linked_deque::{AllocError, Budget, Global, LinkedDeque, NodeAlloc};
use serde::{Deserialize, Serialize};
use std::alloc::Layout;
use std::ptr::NonNull;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Job {
    id: u32,
    name: String,
}

#[test]
fn test_serializes_front_to_back() {
    let mut deque = LinkedDeque::new();
    deque.append(2).unwrap();
    deque.append(3).unwrap();
    deque.push(1).unwrap();

    assert_eq!(serde_json::to_string(&deque).unwrap(), "[1,2,3]");
}

#[test]
fn test_deserializes_in_order() {
    let json = r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#;
    let mut deque: LinkedDeque<Job> = serde_json::from_str(json).unwrap();

    assert_eq!(deque.len(), 2);
    assert_eq!(deque.pop().map(|job| job.id), Some(1));
    assert_eq!(deque.tail().map(|job| job.name.as_str()), Some("b"));
}

#[test]
fn test_roundtrip_in_struct() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Queue {
        pending: LinkedDeque<Job>,
    }

    let queue = Queue {
        pending: (0..3)
            .map(|id| Job {
                id,
                name: format!("job-{id}"),
            })
            .collect(),
    };
    let json = serde_json::to_string(&queue).unwrap();
    let back: Queue = serde_json::from_str(&json).unwrap();
    assert_eq!(queue, back);
}

#[test]
fn test_rejects_non_sequence() {
    let err = serde_json::from_str::<LinkedDeque<u8>>("{\"a\":1}").unwrap_err();
    assert!(err.to_string().contains("a sequence"));
}

#[test]
fn test_budget_backed_deque_deserializes() {
    let deque: LinkedDeque<u8, Budget> = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(deque.allocator().live(), 3);
    assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_allocation_failure_is_a_deserialization_error() {
    #[derive(Clone, Default)]
    struct Refusing;

    impl NodeAlloc for Refusing {
        fn allocate(&self, _layout: Layout) -> Result<NonNull<u8>, AllocError> {
            Err(AllocError)
        }

        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            Global.deallocate(ptr, layout);
        }
    }

    let err = serde_json::from_str::<LinkedDeque<u8, Refusing>>("[1,2,3]").unwrap_err();
    assert!(err.to_string().contains("memory allocation failed"));

    // Nothing to allocate, nothing to refuse.
    let empty: LinkedDeque<u8, Refusing> = serde_json::from_str("[]").unwrap();
    assert!(empty.is_empty());
}
