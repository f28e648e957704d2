use neu_vector::NeuVector;
use std::sync::Mutex;
use std::thread;

// DynamicArray 本身不加锁，多线程写入需要在调用方包一层 Mutex
fn main() {
    println!("--- Mutex-guarded Sharing Example ---");
    let shared = Mutex::new(NeuVector::with_capacity(2).expect("allocation failed"));

    thread::scope(|s| {
        for t in 0..4 {
            let shared = &shared;
            s.spawn(move || {
                for i in 0..5 {
                    let mut arr = shared.lock().expect("poisoned");
                    arr.append(t * 10 + i).expect("allocation failed");
                }
            });
        }
    });

    let mut arr = shared.into_inner().expect("poisoned");
    arr.as_mut_slice().sort_unstable();
    println!("Collected {} values, capacity {}", arr.len(), arr.capacity());
    println!("{}", arr.to_debug_string());

    // 所有权可以整体转移到另一个线程
    let handle = thread::spawn(move || {
        arr.append(100).expect("allocation failed");
        arr
    });
    let arr = handle.join().expect("thread panicked");
    println!("Back in main thread: {}", arr.print_string());
}
