//! Twin scenarios: mirrored cells alias, separate cells do not

use fieldcalc::{ExportTwin, Twin};
use fieldcalc::settings::EXPORT_NUM;

#[test]
fn test_mirrored_aliasing() {
    let mut m = Twin::<i32, true>::default();
    *m.first_mut() = 42;
    assert_eq!(*m.second(), 42);
    *m.second_mut() = 17;
    assert_eq!(*m.first(), 17);
}

#[test]
fn test_separate_independent() {
    let mut s = Twin::<i32, false>::default();
    *s.first_mut() = 42;
    *s.second_mut() = 17;
    assert_eq!(*s.first(), 42);
    assert_eq!(*s.second(), 17);
}

#[test]
fn test_export_twin_cells() {
    let mut exports = ExportTwin::<Vec<u8>>::default();
    exports.first_mut().push(1);
    let shared = exports.second().len() == 1;
    assert_eq!(shared, EXPORT_NUM == 1);
}
