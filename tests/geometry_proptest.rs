//! Property-based tests for the RAM window math.
//! Every page-aligned rectangle that fits the panel is checked in both scan
//! modes.

use ssd16xx::{Area, RamWindow, ScanMode};

/// Largest panel exercised: 296 gates, 37 pages
const MAX_GATES: u16 = 296;
const MAX_PAGES: u16 = 37;

/// Fold raw values into a rectangle that fits a `gates` x `pages * 8` panel.
fn fit(gates: u16, pages: u16, raw: (u16, u16, u16, u16)) -> Area {
    let (a, b, c, d) = raw;
    let x = a % gates;
    let width = 1 + b % (gates - x);
    let page = c % pages;
    let height_pages = 1 + d % (pages - page);
    Area::new(x, page * 8, width, height_pages * 8)
}

proptest::proptest! {
    /// Mode A counts pages up and gates down.
    #[test]
    fn mode_a_window_direction(
        gates in 1u16..=MAX_GATES,
        pages in 1u16..=MAX_PAGES,
        raw in proptest::prelude::any::<(u16, u16, u16, u16)>()
    ) {
        let area = fit(gates, pages, raw);
        let window = RamWindow::new(&area, ScanMode::XIncYDec, pages * 8);
        assert!(window.x_start <= window.x_end, "{:?} -> {:?}", area, window);
        assert!(window.y_start >= window.y_end, "{:?} -> {:?}", area, window);
    }

    /// Mode B counts pages down and gates up.
    #[test]
    fn mode_b_window_direction(
        gates in 1u16..=MAX_GATES,
        pages in 1u16..=MAX_PAGES,
        raw in proptest::prelude::any::<(u16, u16, u16, u16)>()
    ) {
        let area = fit(gates, pages, raw);
        let window = RamWindow::new(&area, ScanMode::XDecYInc, pages * 8);
        assert!(window.x_start >= window.x_end, "{:?} -> {:?}", area, window);
        assert!(window.y_start <= window.y_end, "{:?} -> {:?}", area, window);
    }

    /// The window holds exactly one byte per eight pixels and every stream
    /// position maps to a distinct RAM address inside the panel.
    #[test]
    fn stream_positions_round_trip(
        gates in 1u16..=MAX_GATES,
        pages in 1u16..=MAX_PAGES,
        raw in proptest::prelude::any::<(u16, u16, u16, u16)>(),
        flipped in proptest::prelude::any::<bool>()
    ) {
        let mode = if flipped { ScanMode::XIncYDec } else { ScanMode::XDecYInc };
        let area = fit(gates, pages, raw);
        let window = RamWindow::new(&area, mode, pages * 8);

        let pixels = usize::from(area.width) * usize::from(area.height);
        assert_eq!(window.len(), pixels / 8);
        for n in 0..window.len() {
            let address = window.address_of(n);
            assert!(address.page < pages && address.gate < gates, "{:?}", address);
            assert_eq!(window.offset_of(address), Some(n));
        }
    }
}
