//! Where the panel goes.
//!
//! Layout is computed in two coordinate spaces. The window rectangle is
//! logical: the target work area divided by the primary monitor's scale,
//! so the panel keeps one logical size across mixed-DPI setups. The
//! app-bar rectangle is physical, because that is what the shell
//! negotiates in.

use crate::config::Settings;
use crate::monitor::{self, Monitor};
use crate::{DockEdge, DockError, DockResult, Rect, WorkArea};

/// Space the panel currently holds from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub screen: usize,
    pub edge: DockEdge,
    /// Negotiated extent across the docked edge, in physical pixels.
    pub extent: i32,
}

/// Result of [`compute_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Index of the monitor actually used.
    pub screen: usize,
    pub edge: DockEdge,
    /// Window rectangle in logical units.
    pub window: WorkArea,
    /// Rectangle proposed to the shell, in physical pixels.
    pub appbar: WorkArea,
    pub primary_scale_x: f64,
    pub primary_scale_y: f64,
}

impl Layout {
    /// Window rectangle in physical pixels, for moving the window.
    pub fn window_bounds(&self) -> Rect {
        let mut bounds = self.window;
        bounds.scale(self.primary_scale_x, self.primary_scale_y);
        bounds.to_rect()
    }

    pub fn appbar_rect(&self) -> Rect {
        self.appbar.to_rect()
    }

    /// Whether the layout asks the shell to reserve any space.
    pub fn reserves_space(&self) -> bool {
        self.appbar.extent(self.edge) > 0.0
    }
}

/// Work area of `monitor` with the panel's own prior reservation handed back.
///
/// Once the panel holds a reservation, the OS-reported work area already
/// excludes it. When the reservation is on the same screen and edge, the
/// docked side of the work area is pushed back over it so the panel can
/// re-derive the same position. The push only happens when the result
/// still fits inside the monitor, which keeps a work area the shell has
/// not shrunk yet from being extended twice.
pub fn effective_work_area(
    monitor: &Monitor,
    prior: Option<&Reservation>,
    screen: usize,
    edge: DockEdge,
) -> Rect {
    let mut work = monitor.work_area;
    let Some(prior) = prior else {
        return work;
    };
    if prior.screen != screen || prior.edge != edge || prior.extent <= 0 {
        return work;
    }

    let (work_extent, monitor_extent) = match edge {
        DockEdge::Top | DockEdge::Bottom => (work.height(), monitor.rect.height()),
        _ => (work.width(), monitor.rect.width()),
    };
    if work_extent + prior.extent > monitor_extent {
        return work;
    }

    match edge {
        DockEdge::Left => work.left = (work.left - prior.extent).max(monitor.rect.left),
        DockEdge::Right => work.right = (work.right + prior.extent).min(monitor.rect.right),
        DockEdge::Top => work.top = (work.top - prior.extent).max(monitor.rect.top),
        DockEdge::Bottom => work.bottom = (work.bottom + prior.extent).min(monitor.rect.bottom),
        DockEdge::None => {}
    }
    work
}

/// Computes the window and app-bar rectangles for the current settings.
///
/// A screen index past the end of `monitors` resolves to the primary
/// monitor. An empty list is fatal, as is a `None` edge.
pub fn compute_layout(
    monitors: &[Monitor],
    settings: &Settings,
    prior: Option<&Reservation>,
) -> DockResult<Layout> {
    let edge = settings.panel.edge;
    if !edge.is_dockable() {
        return Err(DockError::InvalidDockEdge);
    }
    let primary = monitor::primary(monitors).ok_or(DockError::NoMonitors)?;
    let (screen, active) =
        monitor::select(monitors, settings.panel.screen).ok_or(DockError::NoMonitors)?;

    let work = effective_work_area(active, prior, screen, edge);
    let x_offset = f64::from(settings.panel.x_offset);
    let y_offset = f64::from(settings.panel.y_offset);

    let mut window = WorkArea::from_rect(work);
    window.scale(primary.inverse_scale_x(), primary.inverse_scale_y());
    window.set_extent(edge, f64::from(settings.panel.width) * settings.panel.ui_scale);
    window.offset(x_offset, y_offset);

    let edge_scale = match edge {
        DockEdge::Top | DockEdge::Bottom => primary.scale_y(),
        _ => primary.scale_x(),
    };
    let reserved = if settings.behavior.use_appbar {
        window.extent(edge) * edge_scale
    } else {
        0.0
    };
    let mut appbar = WorkArea::from_rect(work);
    appbar.set_extent(edge, reserved);
    appbar.offset(x_offset, y_offset);

    Ok(Layout {
        screen,
        edge,
        window,
        appbar,
        primary_scale_x: primary.scale_x(),
        primary_scale_y: primary.scale_y(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::test_monitor;

    fn two_monitors() -> Vec<Monitor> {
        vec![
            test_monitor(
                Rect::new(0, 0, 1920, 1080),
                Rect::new(0, 0, 1920, 1040),
                96,
                true,
            ),
            test_monitor(
                Rect::new(1920, 0, 3200, 1024),
                Rect::new(1920, 0, 3200, 1024),
                120,
                false,
            ),
        ]
    }

    fn settings(edge: DockEdge, screen: usize) -> Settings {
        let mut settings = Settings::default();
        settings.panel.edge = edge;
        settings.panel.screen = screen;
        settings.panel.width = 180;
        settings
    }

    #[test]
    fn docks_right_on_secondary_monitor() {
        // Arrange
        let monitors = two_monitors();

        // Act
        let layout = compute_layout(&monitors, &settings(DockEdge::Right, 1), None).unwrap();

        // Assert
        assert_eq!(layout.screen, 1);
        assert_eq!(layout.window_bounds(), Rect::new(3020, 0, 3200, 1024));
        assert_eq!(layout.appbar_rect(), Rect::new(3020, 0, 3200, 1024));
    }

    #[test]
    fn docks_left_on_primary_monitor() {
        // Act
        let layout =
            compute_layout(&two_monitors(), &settings(DockEdge::Left, 0), None).unwrap();

        // Assert
        assert_eq!(layout.window_bounds(), Rect::new(0, 0, 180, 1040));
    }

    #[test]
    fn stale_screen_index_falls_back_to_primary() {
        // Arrange
        let monitors = two_monitors();

        // Act
        let layout = compute_layout(&monitors, &settings(DockEdge::Right, 3), None).unwrap();

        // Assert
        assert_eq!(layout.screen, 0);
        assert_eq!(layout.window_bounds(), Rect::new(1740, 0, 1920, 1040));
    }

    #[test]
    fn every_screen_index_resolves_in_range() {
        // Arrange
        let monitors = two_monitors();

        for index in 0..8 {
            // Act
            let layout =
                compute_layout(&monitors, &settings(DockEdge::Right, index), None).unwrap();

            // Assert
            assert!(layout.screen < monitors.len(), "index {index}");
        }
    }

    #[test]
    fn window_is_logical_under_scaled_primary() {
        // Arrange: primary at 150%.
        let monitors = vec![test_monitor(
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1920, 1032),
            144,
            true,
        )];

        // Act
        let layout = compute_layout(&monitors, &settings(DockEdge::Right, 0), None).unwrap();

        // Assert
        assert!((layout.window.width() - 180.0).abs() < 1e-9);
        assert_eq!(layout.window_bounds(), Rect::new(1650, 0, 1920, 1032));
        assert_eq!(layout.appbar_rect(), Rect::new(1650, 0, 1920, 1032));
    }

    #[test]
    fn ui_scale_and_offsets_apply_to_both_rects() {
        // Arrange
        let mut s = settings(DockEdge::Right, 0);
        s.panel.ui_scale = 1.5;
        s.panel.x_offset = -10;
        s.panel.y_offset = 20;

        // Act
        let layout = compute_layout(&two_monitors(), &s, None).unwrap();

        // Assert
        assert_eq!(layout.window_bounds(), Rect::new(1640, 20, 1910, 1060));
        assert_eq!(layout.appbar_rect(), Rect::new(1640, 20, 1910, 1060));
    }

    #[test]
    fn no_reservation_without_appbar() {
        // Arrange
        let mut s = settings(DockEdge::Right, 0);
        s.behavior.use_appbar = false;

        // Act
        let layout = compute_layout(&two_monitors(), &s, None).unwrap();

        // Assert
        assert!(!layout.reserves_space());
        assert_eq!(layout.appbar_rect(), Rect::new(1920, 0, 1920, 1040));
        assert_eq!(layout.window_bounds(), Rect::new(1740, 0, 1920, 1040));
    }

    #[test]
    fn none_edge_is_rejected() {
        // Act
        let result = compute_layout(&two_monitors(), &settings(DockEdge::None, 0), None);

        // Assert
        assert_eq!(result, Err(DockError::InvalidDockEdge));
    }

    #[test]
    fn empty_monitor_list_is_fatal() {
        // Act
        let result = compute_layout(&[], &settings(DockEdge::Right, 0), None);

        // Assert
        assert_eq!(result, Err(DockError::NoMonitors));
    }

    #[test]
    fn top_edge_uses_height() {
        // Act
        let layout = compute_layout(&two_monitors(), &settings(DockEdge::Top, 0), None).unwrap();

        // Assert
        assert_eq!(layout.window_bounds(), Rect::new(0, 0, 1920, 180));
    }

    fn reserved_primary() -> Monitor {
        // Panel already holds 180px on the right; the taskbar takes 40px at the bottom.
        test_monitor(
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1740, 1040),
            96,
            true,
        )
    }

    #[test]
    fn prior_reservation_is_handed_back() {
        // Arrange
        let prior = Reservation {
            screen: 0,
            edge: DockEdge::Right,
            extent: 180,
        };

        // Act
        let work = effective_work_area(&reserved_primary(), Some(&prior), 0, DockEdge::Right);

        // Assert
        assert_eq!(work, Rect::new(0, 0, 1920, 1040));
    }

    #[test]
    fn reposition_keeps_position_with_prior_reservation() {
        // Arrange
        let monitors = vec![reserved_primary()];
        let prior = Reservation {
            screen: 0,
            edge: DockEdge::Right,
            extent: 180,
        };

        // Act
        let layout =
            compute_layout(&monitors, &settings(DockEdge::Right, 0), Some(&prior)).unwrap();

        // Assert
        assert_eq!(layout.window_bounds(), Rect::new(1740, 0, 1920, 1040));
    }

    #[test]
    fn reservation_on_other_edge_or_screen_is_ignored() {
        // Arrange
        let monitor = reserved_primary();
        let left = Reservation {
            screen: 0,
            edge: DockEdge::Left,
            extent: 180,
        };
        let other_screen = Reservation {
            screen: 1,
            edge: DockEdge::Right,
            extent: 180,
        };

        // Assert
        assert_eq!(
            effective_work_area(&monitor, Some(&left), 0, DockEdge::Right),
            monitor.work_area
        );
        assert_eq!(
            effective_work_area(&monitor, Some(&other_screen), 0, DockEdge::Right),
            monitor.work_area
        );
    }

    #[test]
    fn unshrunk_work_area_is_not_extended() {
        // Arrange: the shell has not applied the reservation yet.
        let monitor = test_monitor(
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1920, 1040),
            96,
            true,
        );
        let prior = Reservation {
            screen: 0,
            edge: DockEdge::Right,
            extent: 180,
        };

        // Act
        let work = effective_work_area(&monitor, Some(&prior), 0, DockEdge::Right);

        // Assert
        assert_eq!(work, monitor.work_area);
    }

    #[test]
    fn left_reservation_extends_left_side() {
        // Arrange
        let monitor = test_monitor(
            Rect::new(0, 0, 1920, 1080),
            Rect::new(200, 0, 1920, 1040),
            96,
            true,
        );
        let prior = Reservation {
            screen: 0,
            edge: DockEdge::Left,
            extent: 200,
        };

        // Act
        let work = effective_work_area(&monitor, Some(&prior), 0, DockEdge::Left);

        // Assert
        assert_eq!(work, Rect::new(0, 0, 1920, 1040));
    }
}
