//! Internal testing utilities

use crate::root::{alloc, ptr};
use crate::root::cell::{Cell, RefCell};
use crate::root::marker::PhantomData;

use crate::allocator::{Allocator, Layout};

//  Allocation
//
//  Description of an allocation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Allocation {
    //  The size of the allocation, in bytes.
    pub size: usize,
    //  The alignment of the allocation, in bytes.
    pub alignment: usize,
    //  The pointer allocated.
    pub pointer: *mut u8,
}

impl Allocation {
    pub fn new(pointer: *mut u8, layout: Layout) -> Self {
        Allocation {
            size: layout.size(),
            alignment: layout.align(),
            pointer,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::from_size_align(self.size, self.alignment).unwrap()
    }
}

//  Test Heap
//
//  A heap specifically for testing, handed out as an `Allocator` record:
//  -   Allows injecting allocation failures.
//  -   Checks that reallocations and deallocations match a live allocation.
//  -   Counts the calls made through each slot.
//
//  The record slots are plain function pointers, hence the state lives in a thread-local, indexed by `ID`; tests
//  running on separate threads do not interfere, and two heaps with different IDs may be used within a single test.
pub struct TestHeap<const ID: usize>(PhantomData<*mut u8>);

impl<const ID: usize> TestHeap<ID> {
    //  Creates a fresh heap, with no allocation allowed.
    pub fn new() -> Self {
        with_state::<ID, _>(|state| {
            state.release_all();
            state.allowed.set(0);
            state.calls.set(0);
            state.reallocations.set(0);
        });

        TestHeap(PhantomData)
    }

    //  Returns an `Allocator` record whose slots target this heap.
    pub fn allocator(&self) -> Allocator {
        Allocator {
            allocate: Some(test_allocate::<ID>),
            zero_allocate: Some(test_zero_allocate::<ID>),
            reallocate: Some(test_reallocate::<ID>),
            free: Some(test_free::<ID>),
        }
    }

    //  Sets the number of (re)allocations allowed.
    pub fn allow(&self, allowed: usize) {
        with_state::<ID, _>(|state| state.allowed.set(allowed));
    }

    //  Returns the live allocations.
    pub fn allocations(&self) -> Vec<Allocation> {
        with_state::<ID, _>(|state| state.allocations.borrow().clone())
    }

    //  Returns the sizes of the live allocations.
    pub fn allocation_sizes(&self) -> Vec<usize> {
        self.allocations().iter().map(|a| a.size).collect()
    }

    //  Returns the number of live allocations.
    pub fn live(&self) -> usize { self.allocations().len() }

    //  Returns the number of calls made through any slot.
    pub fn calls(&self) -> usize {
        with_state::<ID, _>(|state| state.calls.get())
    }

    //  Returns the number of calls made through the reallocate slot.
    pub fn reallocations(&self) -> usize {
        with_state::<ID, _>(|state| state.reallocations.get())
    }
}

impl<const ID: usize> Drop for TestHeap<ID> {
    fn drop(&mut self) {
        with_state::<ID, _>(|state| state.release_all());
    }
}

//
//  Implementation Details
//

const NUMBER_HEAPS: usize = 2;

#[derive(Default)]
struct HeapState {
    //  The number of (re)allocations allowed.
    allowed: Cell<usize>,
    //  The number of calls, through any slot.
    calls: Cell<usize>,
    //  The number of calls through the reallocate slot.
    reallocations: Cell<usize>,
    //  The allocations performed; to check deallocation requests.
    allocations: RefCell<Vec<Allocation>>,
}

impl HeapState {
    //  Consumes one allowance, if any is left.
    fn consume(&self) -> bool {
        self.calls.set(self.calls.get() + 1);

        if self.allowed.get() == 0 {
            return false;
        }

        self.allowed.set(self.allowed.get() - 1);
        true
    }

    //  Removes the allocation, panicking if it is unknown.
    fn remove(&self, allocation: Allocation) {
        let index = self.allocations.borrow().iter().position(|a| *a == allocation);

        if let Some(index) = index {
            self.allocations.borrow_mut().remove(index);
        } else {
            panic!("Could not find {:?} in {:?}",
                allocation, &*self.allocations.borrow());
        }
    }

    //  Releases all live allocations.
    fn release_all(&self) {
        for a in self.allocations.borrow_mut().drain(..) {
            //  Safety:
            //  -   Were allocated, and not deallocated.
            unsafe { alloc::dealloc(a.pointer, a.layout()) };
        }
    }
}

thread_local! {
    static HEAPS: [HeapState; NUMBER_HEAPS] = Default::default();
}

fn with_state<const ID: usize, R>(fun: impl FnOnce(&HeapState) -> R) -> R {
    HEAPS.with(|heaps| fun(&heaps[ID]))
}

unsafe fn test_allocate<const ID: usize>(layout: Layout) -> *mut u8 {
    with_state::<ID, _>(|state| {
        if !state.consume() {
            return ptr::null_mut();
        }

        //  Safety:
        //  -   Forwarding.
        let result = unsafe { alloc::alloc(layout) };
        assert_ne!(ptr::null_mut(), result);

        state.allocations.borrow_mut().push(Allocation::new(result, layout));

        result
    })
}

unsafe fn test_zero_allocate<const ID: usize>(layout: Layout) -> *mut u8 {
    with_state::<ID, _>(|state| {
        if !state.consume() {
            return ptr::null_mut();
        }

        //  Safety:
        //  -   Forwarding.
        let result = unsafe { alloc::alloc_zeroed(layout) };
        assert_ne!(ptr::null_mut(), result);

        state.allocations.borrow_mut().push(Allocation::new(result, layout));

        result
    })
}

unsafe fn test_reallocate<const ID: usize>(pointer: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
    with_state::<ID, _>(|state| {
        state.reallocations.set(state.reallocations.get() + 1);

        if !state.consume() {
            return ptr::null_mut();
        }

        state.remove(Allocation::new(pointer, layout));

        //  Safety:
        //  -   The allocation was live, as checked by `remove`.
        let result = unsafe { alloc::realloc(pointer, layout, new_size) };
        assert_ne!(ptr::null_mut(), result);

        let new_layout = Layout::from_size_align(new_size, layout.align()).unwrap();
        state.allocations.borrow_mut().push(Allocation::new(result, new_layout));

        result
    })
}

unsafe fn test_free<const ID: usize>(pointer: *mut u8, layout: Layout) {
    with_state::<ID, _>(|state| {
        state.calls.set(state.calls.get() + 1);

        state.remove(Allocation::new(pointer, layout));

        //  Safety:
        //  -   The allocation was live, as checked by `remove`.
        unsafe { alloc::dealloc(pointer, layout) };
    })
}
