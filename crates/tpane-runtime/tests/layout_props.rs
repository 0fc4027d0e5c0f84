//! Property tests for the three-pane layout across arbitrary terminal sizes.

use std::sync::Arc;

use proptest::prelude::*;
use tpane_render::MemorySurface;
use tpane_runtime::Screen;

proptest! {
    /// The three panes tile the terminal exactly, whatever its size.
    #[test]
    fn panes_tile_the_terminal(w in 0u16..=200, h in 0u16..=200) {
        let surface = Arc::new(MemorySurface::new(w, h));
        let (screen, _commits) = Screen::new(Arc::clone(&surface), w, h);

        let log = screen.log().area();
        let help = screen.help().area();
        let input = screen.input().area();

        prop_assert_eq!((log.x, log.y), (0, 0));
        prop_assert_eq!(help.x, log.width);
        prop_assert_eq!(log.width + help.width, w);
        prop_assert_eq!(help.right(), w);
        prop_assert_eq!(log.height, help.height);
        prop_assert_eq!(input.x, 0);
        prop_assert_eq!(input.y, log.height);
        prop_assert_eq!(input.width, w);
        prop_assert_eq!(input.bottom(), h);

        // Any geometry renders without panicking, including zero-area panes.
        screen.log_line("The quick brown fox jumps over the lazy dog");
        screen.render_all().unwrap();
    }

    /// Resizing in place lands on the same layout as building fresh.
    #[test]
    fn resize_matches_fresh_layout(
        w1 in 0u16..=120,
        h1 in 0u16..=80,
        w2 in 0u16..=120,
        h2 in 0u16..=80,
    ) {
        let surface = Arc::new(MemorySurface::new(w1, h1));
        let (screen, _commits) = Screen::new(Arc::clone(&surface), w1, h1);
        screen.resize(w2, h2);

        let fresh_surface = Arc::new(MemorySurface::new(w2, h2));
        let (fresh, _fresh_commits) = Screen::new(Arc::clone(&fresh_surface), w2, h2);

        prop_assert_eq!(screen.log().area(), fresh.log().area());
        prop_assert_eq!(screen.help().area(), fresh.help().area());
        prop_assert_eq!(screen.input().area(), fresh.input().area());
    }
}
