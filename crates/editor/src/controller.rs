// Chunk: docs/chunks/reconciliation - Dependency reconciliation for the text surface
//!
//! The reconciliation controller.
//!
//! The controller watches four dependency slots (language, theme, font and
//! line-height multiple) plus the document text, and keeps the text surface
//! and ruler consistent with them.
//!
//! Which work a change needs is decided by [`plan`], a pure function from the
//! old and new slots to a set of [`ReconcileAction`]s:
//!
//! | Change                       | Actions                                          |
//! |------------------------------|--------------------------------------------------|
//! | language                     | rebuild parse state, full style                  |
//! | theme                        | full style                                       |
//! | font or line-height multiple | compute metrics, full style, reload display      |
//! | two or more slots at once    | the union of the above, plus reload display      |
//!
//! Actions always run in the order listed by [`ReconcileAction`]'s `Ord`, and
//! a whole plan runs before the entry point returns, so the surface never
//! shows new colors with stale metrics.
//!
//! Text edits take a separate path: the parse state is updated incrementally
//! and only the lines whose syntax changed are restyled.

use std::num::NonZeroUsize;
use std::ops::Range;

use quill_input::{InputInterceptor, KeyEvent, KeyMonitor};
use quill_surface::{expand_to_lines, Font, RulerView, TextEdit, TextSurface};
use quill_syntax::{GrammarProvider, Language, ParseStateManager, Reparse, Theme};

use crate::config::{validate_font, validate_line_height_multiple, EditorConfig};
use crate::error::Result;
use crate::metrics::{compute_metrics, Metrics};
use crate::style::StyleApplicator;

// =============================================================================
// Planning
// =============================================================================

/// One unit of reconciliation work.
///
/// The variant order is the execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReconcileAction {
    /// Discard the parser, query and tree and build them for the current language.
    RebuildParseState,
    /// Recompute metrics from the font and line-height multiple.
    ComputeMetrics,
    /// Restyle the whole document, its appearance and the ruler.
    ApplyFullStyle,
    /// Invalidate the whole visible area.
    ReloadDisplay,
    /// Update the tree for a text edit.
    ReparseText,
    /// Restyle the lines affected by a text edit.
    ApplyRangeStyle,
}

/// The dependency slots the controller reconciles against.
#[derive(Debug, Clone, PartialEq)]
pub struct Slots {
    pub language: Language,
    pub theme: Theme,
    pub font: Font,
    pub line_height_multiple: f64,
}

impl Slots {
    /// Applies a change, returning true if the slot's value differs afterwards.
    pub fn apply(&mut self, change: SlotChange) -> bool {
        match change {
            SlotChange::Language(language) => replace(&mut self.language, language),
            SlotChange::Theme(theme) => replace(&mut self.theme, theme),
            SlotChange::Font(font) => replace(&mut self.font, font),
            SlotChange::LineHeightMultiple(multiple) => replace(&mut self.line_height_multiple, multiple),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}

/// A new value for one dependency slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotChange {
    Language(Language),
    Theme(Theme),
    Font(Font),
    LineHeightMultiple(f64),
}

/// The actions a change requires, in execution order and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    actions: Vec<ReconcileAction>,
}

impl ReconcilePlan {
    pub fn new(actions: impl IntoIterator<Item = ReconcileAction>) -> Self {
        let mut actions: Vec<_> = actions.into_iter().collect();
        actions.sort();
        actions.dedup();
        Self { actions }
    }

    /// The plan run once at construction: everything.
    pub fn initial() -> Self {
        Self::new([
            ReconcileAction::RebuildParseState,
            ReconcileAction::ComputeMetrics,
            ReconcileAction::ApplyFullStyle,
            ReconcileAction::ReloadDisplay,
        ])
    }

    pub fn actions(&self) -> &[ReconcileAction] {
        &self.actions
    }

    pub fn contains(&self, action: ReconcileAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Decides which actions turn a surface styled for `old` into one styled for `new`.
pub fn plan(old: &Slots, new: &Slots) -> ReconcilePlan {
    let language = old.language != new.language;
    let theme = old.theme != new.theme;
    let font = old.font != new.font;
    let multiple = old.line_height_multiple != new.line_height_multiple;
    let metrics = font || multiple;
    let changed = [language, theme, font, multiple].into_iter().filter(|c| *c).count();

    let mut actions = Vec::new();
    if language {
        actions.push(ReconcileAction::RebuildParseState);
    }
    if metrics {
        actions.push(ReconcileAction::ComputeMetrics);
    }
    if changed > 0 {
        actions.push(ReconcileAction::ApplyFullStyle);
    }
    if metrics || changed >= 2 {
        actions.push(ReconcileAction::ReloadDisplay);
    }
    ReconcilePlan::new(actions)
}

/// What one entry point did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Actions executed, in order
    pub actions: Vec<ReconcileAction>,
    /// The byte range restyled by a range-scoped pass, if one ran
    pub restyled: Option<Range<usize>>,
}

impl ReconcileReport {
    pub fn contains(&self, action: ReconcileAction) -> bool {
        self.actions.contains(&action)
    }

    /// True if nothing had to be done.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Keeps a text surface and its ruler styled for the current language,
/// theme, font and text.
pub struct ReconciliationController<S, R, G> {
    surface: S,
    ruler: R,
    grammars: G,
    slots: Slots,
    metrics: Metrics,
    parse: ParseStateManager,
    styles: StyleApplicator,
    interceptor: InputInterceptor,
}

impl<S, R, G> ReconciliationController<S, R, G>
where
    S: TextSurface,
    R: RulerView,
    G: GrammarProvider,
{
    /// Creates a controller and runs one full reconciliation pass.
    ///
    /// Fails if the config does not validate; nothing is written to the
    /// surface in that case.
    pub fn new(config: EditorConfig, mut surface: S, ruler: R, grammars: G) -> Result<Self> {
        config.validate()?;

        surface.set_text(&config.text);
        let metrics = compute_metrics(&config.font, config.line_height_multiple);
        let mut controller = Self {
            surface,
            ruler,
            grammars,
            slots: Slots {
                language: config.language,
                theme: config.theme,
                font: config.font,
                line_height_multiple: config.line_height_multiple,
            },
            metrics,
            parse: ParseStateManager::default(),
            styles: StyleApplicator::new(),
            interceptor: InputInterceptor::new(config.tab_width),
        };
        controller.execute(&ReconcilePlan::initial());
        Ok(controller)
    }

    // ==================== Dependency changes ====================

    pub fn set_language(&mut self, language: Language) -> ReconcileReport {
        self.reconcile(SlotChange::Language(language))
    }

    pub fn set_theme(&mut self, theme: Theme) -> ReconcileReport {
        self.reconcile(SlotChange::Theme(theme))
    }

    pub fn set_font(&mut self, font: Font) -> Result<ReconcileReport> {
        self.update([SlotChange::Font(font)])
    }

    pub fn set_line_height_multiple(&mut self, multiple: f64) -> Result<ReconcileReport> {
        self.update([SlotChange::LineHeightMultiple(multiple)])
    }

    /// Applies several slot changes as one reconciliation pass.
    ///
    /// All changes are validated before any is applied; on error the
    /// controller and surface are left as they were.
    pub fn update(&mut self, changes: impl IntoIterator<Item = SlotChange>) -> Result<ReconcileReport> {
        let mut next = self.slots.clone();
        for change in changes {
            match &change {
                SlotChange::Font(font) => validate_font(font)?,
                SlotChange::LineHeightMultiple(multiple) => validate_line_height_multiple(*multiple)?,
                SlotChange::Language(_) | SlotChange::Theme(_) => {}
            }
            next.apply(change);
        }
        let plan = plan(&self.slots, &next);
        self.slots = next;
        Ok(self.execute(&plan))
    }

    /// Single-slot change that cannot fail validation.
    fn reconcile(&mut self, change: SlotChange) -> ReconcileReport {
        let mut next = self.slots.clone();
        next.apply(change);
        let plan = plan(&self.slots, &next);
        self.slots = next;
        self.execute(&plan)
    }

    fn execute(&mut self, plan: &ReconcilePlan) -> ReconcileReport {
        for action in plan.actions() {
            match action {
                ReconcileAction::RebuildParseState => {
                    self.parse
                        .set_language(self.slots.language.clone(), self.surface.text(), &self.grammars);
                }
                ReconcileAction::ComputeMetrics => {
                    self.metrics = compute_metrics(&self.slots.font, self.slots.line_height_multiple);
                }
                ReconcileAction::ApplyFullStyle => self.apply_full_style(),
                ReconcileAction::ReloadDisplay => self.surface.reload_display(),
                // Text edits run these through `text_did_change`; `plan` never emits them.
                ReconcileAction::ReparseText | ReconcileAction::ApplyRangeStyle => {}
            }
        }
        if !plan.is_empty() {
            tracing::debug!(actions = ?plan.actions(), "reconciled");
        }
        ReconcileReport {
            actions: plan.actions().to_vec(),
            restyled: None,
        }
    }

    fn apply_full_style(&mut self) {
        self.styles.apply_full_style(
            &mut self.surface,
            &mut self.ruler,
            &self.slots.theme,
            &self.slots.font,
            &self.metrics,
            &self.parse,
        );
    }

    // ==================== Text changes ====================

    /// Reconciles after the host applied `edit` to the surface's text.
    ///
    /// With a tree, the restyled range is the union of the lines whose syntax
    /// changed and the lines the edit touched. Without one, only the edited
    /// lines get base attributes. If the tree had to be rebuilt from scratch
    /// the whole document is restyled.
    pub fn text_did_change(&mut self, edit: &TextEdit) -> ReconcileReport {
        let reparse = self.parse.reparse(edit, self.surface.text());

        let changed = match reparse {
            Reparse::Full => {
                self.apply_full_style();
                return ReconcileReport {
                    actions: vec![ReconcileAction::ReparseText, ReconcileAction::ApplyFullStyle],
                    restyled: None,
                };
            }
            Reparse::Unstyled => edit.inserted_range(),
            Reparse::Incremental(ranges) => ranges.into_iter().fold(edit.inserted_range(), |acc, r| {
                acc.start.min(r.start)..acc.end.max(r.end)
            }),
        };

        let range = expand_to_lines(self.surface.text(), changed);
        self.styles.apply_range_style(
            &mut self.surface,
            &self.slots.theme,
            &self.slots.font,
            &self.metrics,
            &self.parse,
            range.clone(),
        );
        ReconcileReport {
            actions: vec![ReconcileAction::ReparseText, ReconcileAction::ApplyRangeStyle],
            restyled: Some(range),
        }
    }

    /// Replaces the whole document, reparses it and restyles everything.
    pub fn set_text(&mut self, text: &str) -> ReconcileReport {
        self.surface.set_text(text);
        self.parse.replace_source(self.surface.text());
        self.apply_full_style();
        ReconcileReport {
            actions: vec![ReconcileAction::ReparseText, ReconcileAction::ApplyFullStyle],
            restyled: None,
        }
    }

    // ==================== Input ====================

    /// Registers the tab interceptor with the host's key monitor.
    pub fn activate(&mut self, monitor: &mut dyn KeyMonitor) {
        self.interceptor.register(monitor);
    }

    /// Deregisters the tab interceptor.
    pub fn deactivate(&mut self, monitor: &mut dyn KeyMonitor) {
        self.interceptor.unregister(monitor);
    }

    pub fn is_active(&self) -> bool {
        self.interceptor.is_registered()
    }

    /// Feeds one observed key transition to the tab interceptor.
    ///
    /// When the interceptor asks for an insertion, the spaces are inserted at
    /// the caret and reconciled like any other edit. Returns that edit. The
    /// event itself is never consumed; the host forwards it as usual.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<TextEdit> {
        let interception = self.interceptor.observe(event);
        let text = interception.insertion()?;
        let edit = self.surface.insert_at_caret(text);
        self.text_did_change(&edit);
        Some(edit)
    }

    pub fn set_tab_width(&mut self, tab_width: NonZeroUsize) {
        self.interceptor.set_tab_width(tab_width);
    }

    pub fn tab_width(&self) -> NonZeroUsize {
        self.interceptor.tab_width()
    }

    // ==================== Accessors ====================

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for host-side edits; report them with
    /// [`text_did_change`](Self::text_did_change).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn ruler(&self) -> &R {
        &self.ruler
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn language(&self) -> &Language {
        &self.slots.language
    }

    pub fn theme(&self) -> &Theme {
        &self.slots.theme
    }

    pub fn font(&self) -> &Font {
        &self.slots.font
    }

    pub fn line_height_multiple(&self) -> f64 {
        self.slots.line_height_multiple
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn parse_state(&self) -> &ParseStateManager {
        &self.parse
    }

    pub fn style_applicator(&self) -> &StyleApplicator {
        &self.styles
    }

    pub fn grammars(&self) -> &G {
        &self.grammars
    }
}
