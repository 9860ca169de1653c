//! Vertical bar chart
//!
//! Bars grow upwards from a common baseline. The chart remembers the pixel
//! height it last drew for every bar, so [`BarChart::show`] only touches the
//! span between the old and the new top of each bar.

use pagewise_core::{Canvas, Error, Segment, Transport};

/// Input range used by the fitted constructors
pub const DEFAULT_RANGE: (i32, i32) = (0, 100);

/// `N` bars sharing geometry and input range
#[derive(Debug, Clone)]
pub struct BarChart<const N: usize> {
    /// Left edge of the first bar
    x: u8,
    /// Baseline row (bottom pixel of every bar)
    y: u8,
    width: u8,
    spacing: u8,
    height: u8,
    min: i32,
    max: i32,
    /// Last drawn bar heights in pixels
    last: [u8; N],
}

impl<const N: usize> BarChart<N> {
    /// Chart with explicit geometry; `y` is the baseline row
    pub fn new(x: u8, y: u8, width: u8, spacing: u8, height: u8, min: i32, max: i32) -> Self {
        Self {
            x,
            y,
            width,
            spacing,
            height,
            min,
            max,
            last: [0; N],
        }
    }

    /// Chart filling the whole segment, bars as wide as the spacing allows
    pub fn fit(segment: &Segment, spacing: u8) -> Self {
        Self::fit_with_range(segment, spacing, DEFAULT_RANGE.0, DEFAULT_RANGE.1)
    }

    /// [`BarChart::fit`] with an explicit input range
    pub fn fit_with_range(segment: &Segment, spacing: u8, min: i32, max: i32) -> Self {
        let bars = N.max(1);
        let gaps = (bars - 1) * spacing as usize;
        let width = (segment.width() as usize).saturating_sub(gaps) / bars;
        let height = segment.height();

        Self::new(0, height - 1, width as u8, spacing, height, min, max)
    }

    /// Change the value mapped to an empty and to a full bar
    pub fn set_input_range(&mut self, min: i32, max: i32) {
        self.min = min;
        self.max = max;
    }

    /// Bar heights in pixels as last drawn
    pub fn heights(&self) -> &[u8; N] {
        &self.last
    }

    /// Pixel height for `value`, clamped to the input range
    pub fn bar_height(&self, value: i32) -> u8 {
        if self.max <= self.min {
            return 0;
        }
        let v = value.clamp(self.min, self.max) as i64 - self.min as i64;
        (v * self.height as i64 / (self.max as i64 - self.min as i64)) as u8
    }

    /// Draw only what changed since the previous call
    ///
    /// On immediate segments the changed area is pushed right away: the union
    /// of all changed spans with `part_update`, the whole chart otherwise.
    pub fn show<T: Transport>(
        &mut self,
        canvas: &mut Canvas<'_, T>,
        values: &[i32; N],
        part_update: bool,
    ) -> Result<(), Error<T::Error>> {
        let base = self.y as i32;
        // rows top..=bottom touched in this batch
        let mut touched: Option<(i32, i32)> = None;

        for (i, &value) in values.iter().enumerate() {
            let new = self.bar_height(value);
            let old = self.last[i];
            if new == old {
                continue;
            }

            let (top, len, on) = if new > old {
                (base - new as i32 + 1, new - old, true)
            } else {
                (base - old as i32 + 1, old - new, false)
            };
            self.column_span(canvas, i, top, len, on);

            let bottom = top + len as i32 - 1;
            touched = Some(match touched {
                Some((t, b)) => (t.min(top), b.max(bottom)),
                None => (top, bottom),
            });
            self.last[i] = new;
        }

        if !canvas.segment().is_immediate() {
            return Ok(());
        }
        match (part_update, touched) {
            (true, Some((top, bottom))) => self.push(canvas, top, bottom),
            (true, None) => Ok(()),
            (false, _) => self.push(canvas, base - self.height as i32 + 1, base),
        }
    }

    /// Redraw every bar and the gaps between them from scratch
    pub fn draw<T: Transport>(
        &mut self,
        canvas: &mut Canvas<'_, T>,
        values: &[i32; N],
    ) -> Result<(), Error<T::Error>> {
        let base = self.y as i32;
        let top = base - self.height as i32 + 1;

        for (i, &value) in values.iter().enumerate() {
            let bar = self.bar_height(value);
            self.column_span(canvas, i, top, self.height - bar, false);
            self.column_span(canvas, i, base - bar as i32 + 1, bar, true);

            let gap_x = self.bar_x(i) + self.width as i32;
            for x in gap_x..gap_x + self.spacing as i32 {
                vline(canvas, x, top, self.height, false);
            }
            self.last[i] = bar;
        }

        if canvas.segment().is_immediate() {
            self.push(canvas, top, base)?;
        }
        Ok(())
    }

    fn bar_x(&self, i: usize) -> i32 {
        self.x as i32 + (self.width as i32 + self.spacing as i32) * i as i32
    }

    fn column_span<T: Transport>(&self, canvas: &mut Canvas<'_, T>, i: usize, top: i32, len: u8, on: bool) {
        let x0 = self.bar_x(i);
        for x in x0..x0 + self.width as i32 {
            vline(canvas, x, top, len, on);
        }
    }

    fn push<T: Transport>(&self, canvas: &mut Canvas<'_, T>, top: i32, bottom: i32) -> Result<(), Error<T::Error>> {
        let right = self.bar_x(N) - self.spacing as i32 - 1;
        if N == 0 || right < self.x as i32 {
            return Ok(());
        }
        let clamp = |v: i32| v.clamp(0, u8::MAX as i32) as u8;
        canvas.update_part(self.x, clamp(top), clamp(right), clamp(bottom))
    }
}

/// Vertical run that may start above the segment
fn vline<T: Transport>(canvas: &mut Canvas<'_, T>, x: i32, top: i32, len: u8, on: bool) {
    if !(0..=u8::MAX as i32).contains(&x) || len == 0 {
        return;
    }
    let skip = (-top).max(0);
    let len = len as i32 - skip;
    if len > 0 && top + skip <= u8::MAX as i32 {
        canvas.draw_vline(x as u8, (top + skip) as u8, len.min(u8::MAX as i32) as u8, on);
    }
}
