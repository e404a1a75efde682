//! Optional scenarios: enabled copies are independent, disabled ones are empty

use fieldcalc::Optional;

#[test]
fn test_enabled_copy_and_move() {
    let mut x = Optional::<i32, true>::new(42);
    let y = x.clone();
    let z = y;
    assert_eq!(x, z);
    assert_eq!(*x.front(), 42);

    *x.get_mut() = 10;
    assert_eq!(*z.front(), 42);
    assert_ne!(x, z);
}

#[test]
fn test_disabled_is_empty() {
    let x = Optional::<i32, false>::new(42);
    assert_eq!(x.front(), 0);
    assert_eq!(x, Optional::<i32, false>::default());
    assert!(x.is_empty());
    assert_eq!(x.iter().count(), 0);
}

#[test]
fn test_iteration_visits_stored_value() {
    let mut x = Optional::<i32, true>::new(1);
    for v in &mut x {
        *v += 1;
    }
    assert_eq!(x.iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(x.len(), 1);
}
