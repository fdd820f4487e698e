//! The widget tree.
//!
//! Every widget lives in a [`Ui`], which owns the whole tree: widgets are
//! created into it and referred to by [`WidgetId`] handles afterwards. A
//! parent owns its children (destroying a parent destroys its subtree), and a
//! child keeps a non-owning link back to its parent for coordinate
//! translation.
//!
//! # Coordinates
//!
//! A widget's *placement* is relative to its parent's placement origin, so a
//! widget's position on screen is the sum of its own origin and all of its
//! ancestors'. See [`Ui::to_screen()`] and [`Ui::to_local()`].
//!
//! Widgets draw into a *surface*, which is the screen unless some ancestor
//! provides an offscreen canvas for its descendants (as a scrolling
//! [`List`](crate::ui::List) does). Positions on a surface are relative to the
//! widget that provided it; see [`Ui::to_surface()`].
//!
//! # Events
//!
//! Each widget has a table of handlers keyed by [`EventType`], filled in by
//! the widget's constructor. [`Ui::dispatch()`] routes an event through a
//! subtree:
//!
//! 1. If the widget has a handler for the event's type, and the event is a
//!    broadcast or is addressed to this widget, the handler runs. If it
//!    accepts the event, dispatch stops there. If it declines an event that
//!    was addressed to this widget, dispatch also stops: targeted events never
//!    fall through to other widgets.
//! 2. Otherwise the event is offered to each child in order, and the first
//!    child that accepts it ends the walk.
//!
//! Handlers get full access to the [`Ui`], so they may post events, edit the
//! tree, or even run a nested dialog loop.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::rc::Rc;

use num::Integer;
use slotmap::new_key_type;
use slotmap::SlotMap;

use crate::geo::Point;
use crate::geo::Rect;
use crate::gfx::text;
use crate::gfx::text::ColorSet;
use crate::gfx::Blend;
use crate::gfx::Canvas;
use crate::gfx::Frontend;
use crate::timing::FrameTimer;
use crate::timing::SystemTimer;
use crate::ui::event::Event;
use crate::ui::event::EventQueue;
use crate::ui::event::EventType;
use crate::ui::event::Payload;
use crate::ui::label::Label;
use crate::ui::ordered::OrderedSet;

new_key_type! {
  /// A handle to a widget in a [`Ui`].
  ///
  /// Handles stay valid until the widget is destroyed. Using a handle after
  /// that is a bug, and panics.
  pub struct WidgetId;

  /// A handle to a drawing surface owned by a [`Ui`].
  pub struct SurfaceId;
}

/// An event handler: returns whether it accepted the event.
pub type Handler = Rc<dyn Fn(&mut Ui, WidgetId, &Event) -> bool>;

/// A hook run on a widget when a child is attached to or detached from it.
///
/// The arguments are the UI, the parent, and the child.
pub type ChildHook = fn(&mut Ui, WidgetId, WidgetId);

/// Upcasting to [`Any`], implemented for every widget type.
pub trait AsAny: Any {
  /// Returns `self` as `&dyn Any`.
  fn as_any(&self) -> &dyn Any;
  /// Returns `self` as `&mut dyn Any`.
  fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
  fn as_any(&self) -> &dyn Any {
    self
  }
  fn as_any_mut(&mut self) -> &mut dyn Any {
    self
  }
}

/// Widget-specific behavior.
///
/// The tree bookkeeping common to all widgets lives in [`Node`]; a `Widget` is
/// the part that differs between kinds of widget. Event handling is not part
/// of this trait: handlers are registered per widget with [`Ui::on()`].
pub trait Widget: AsAny {
  /// Renders this widget and its subtree.
  ///
  /// The default draws nothing and renders the children in order, so later
  /// children draw over earlier ones.
  fn render(&self, cx: &mut RenderCx<'_>, id: WidgetId) {
    cx.render_children(id);
  }

  /// Computes this widget's preferred size, given its bounds.
  ///
  /// Returns `None` if this widget does not size itself.
  fn measure(&self, _bounds: Rect, _surface: &Canvas) -> Option<(i32, i32)> {
    None
  }

  /// Returns the label this widget displays, if it has one.
  fn label(&self) -> Option<&Label> {
    None
  }

  /// Returns the label this widget displays, if it has one.
  fn label_mut(&mut self) -> Option<&mut Label> {
    None
  }
}

/// A widget with no behavior of its own: a plain container.
#[derive(Copy, Clone, Debug, Default)]
pub struct Group;

impl Widget for Group {}

/// Hooks for reacting to changes in a widget's children.
#[derive(Copy, Clone, Default)]
pub struct Hooks {
  /// Runs after a child is attached.
  pub attached: Option<ChildHook>,
  /// Runs after a child is detached.
  pub detached: Option<ChildHook>,
}

/// A node in the widget tree: the bookkeeping shared by every widget.
pub struct Node {
  parent: Option<WidgetId>,
  children: OrderedSet<WidgetId>,
  placement: Rect,
  bounds: Rect,
  child_surface: Option<SurfaceId>,
  handlers: HashMap<EventType, Handler>,
  hooks: Hooks,
  colors: ColorSet,
  blend: Blend,
  enabled: bool,
  widget: Box<dyn Widget>,
}

impl Node {
  /// Returns this widget's parent.
  pub fn parent(&self) -> Option<WidgetId> {
    self.parent
  }

  /// Returns this widget's children, in traversal order.
  pub fn children(&self) -> &OrderedSet<WidgetId> {
    &self.children
  }

  /// Returns this widget's placement, relative to its parent.
  pub fn placement(&self) -> Rect {
    self.placement
  }

  /// Returns this widget's sizing bounds. A zero width or height means that
  /// dimension is sized automatically.
  pub fn bounds(&self) -> Rect {
    self.bounds
  }

  /// Returns the colors this widget should draw with right now.
  pub fn colors(&self) -> ColorSet {
    if self.enabled {
      self.colors
    } else {
      text::DISABLED
    }
  }

  /// Returns how this widget's drawing affects the background.
  pub fn blend(&self) -> Blend {
    self.blend
  }

  /// Returns whether this widget is enabled.
  pub fn enabled(&self) -> bool {
    self.enabled
  }

  /// Returns the surface this widget provides for its descendants, if any.
  pub fn child_surface(&self) -> Option<SurfaceId> {
    self.child_surface
  }

  /// Returns whether this widget has a handler for `ty`.
  pub fn handles(&self, ty: EventType) -> bool {
    self.handlers.contains_key(&ty)
  }

  /// Returns the widget-specific part of this node.
  pub fn widget(&self) -> &dyn Widget {
    &*self.widget
  }
}

impl fmt::Debug for Node {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Node")
      .field("parent", &self.parent)
      .field("children", &self.children)
      .field("placement", &self.placement)
      .field("bounds", &self.bounds)
      .field("enabled", &self.enabled)
      .finish_non_exhaustive()
  }
}

/// Read-only queries over the widget arena, shared by [`Ui`] and
/// [`RenderCx`].
pub struct Tree {
  nodes: SlotMap<WidgetId, Node>,
  screen: SurfaceId,
}

impl Tree {
  /// Returns the node for `id`.
  ///
  /// # Panics
  ///
  /// Panics if `id` has been destroyed.
  pub fn node(&self, id: WidgetId) -> &Node {
    match self.nodes.get(id) {
      Some(node) => node,
      None => panic!("use of destroyed widget {:?}", id),
    }
  }

  fn node_mut(&mut self, id: WidgetId) -> &mut Node {
    match self.nodes.get_mut(id) {
      Some(node) => node,
      None => panic!("use of destroyed widget {:?}", id),
    }
  }

  /// Returns whether `id` refers to a live widget.
  pub fn contains(&self, id: WidgetId) -> bool {
    self.nodes.contains_key(id)
  }

  /// Returns whether `ancestor` is `id` or one of its ancestors.
  pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
    let mut cur = Some(id);
    while let Some(c) = cur {
      if c == ancestor {
        return true;
      }
      cur = self.node(c).parent;
    }
    false
  }

  /// Returns the surface `id` draws into.
  pub fn surface_of(&self, id: WidgetId) -> SurfaceId {
    let mut cur = self.node(id).parent;
    while let Some(c) = cur {
      let node = self.node(c);
      if let Some(surface) = node.child_surface {
        return surface;
      }
      cur = node.parent;
    }
    self.screen
  }

  /// Translates `p` from `id`'s coordinates to coordinates on the surface it
  /// draws into.
  pub fn to_surface(&self, id: WidgetId, mut p: Point) -> Point {
    let mut cur = Some(id);
    while let Some(c) = cur {
      let node = self.node(c);
      p += node.placement.origin();
      cur = node.parent;
      if let Some(parent) = cur {
        if self.node(parent).child_surface.is_some() {
          break;
        }
      }
    }
    p
  }

  /// Translates `p` from `id`'s coordinates to screen coordinates.
  pub fn to_screen(&self, id: WidgetId, p: Point) -> Point {
    let node = self.node(id);
    let p = p + node.placement.origin();
    match node.parent {
      Some(parent) => self.to_screen(parent, p),
      None => p,
    }
  }

  /// Translates `p` from screen coordinates to `id`'s coordinates.
  pub fn to_local(&self, id: WidgetId, p: Point) -> Point {
    let node = self.node(id);
    let p = p - node.placement.origin();
    match node.parent {
      Some(parent) => self.to_local(parent, p),
      None => p,
    }
  }
}

/// The state needed while rendering a subtree.
///
/// Widgets receive a `RenderCx` in [`Widget::render()`]; it gives them
/// read-only access to the tree and write access to drawing surfaces.
pub struct RenderCx<'a> {
  tree: &'a Tree,
  surfaces: &'a mut SlotMap<SurfaceId, Canvas>,
}

impl<'a> RenderCx<'a> {
  /// Returns the widget tree.
  pub fn tree(&self) -> &'a Tree {
    self.tree
  }

  /// Returns the node for `id`.
  pub fn node(&self, id: WidgetId) -> &'a Node {
    self.tree.node(id)
  }

  /// Renders `id` and its subtree.
  pub fn render(&mut self, id: WidgetId) {
    let node = self.tree.node(id);
    node.widget.render(self, id);
  }

  /// Renders each child of `id`, in order.
  pub fn render_children(&mut self, id: WidgetId) {
    let tree = self.tree;
    for child in tree.node(id).children.iter() {
      self.render(child);
    }
  }

  /// Returns the surface `id` draws into.
  pub fn surface_of(&self, id: WidgetId) -> SurfaceId {
    self.tree.surface_of(id)
  }

  /// Returns `id`'s placement in the coordinates of the surface it draws
  /// into.
  pub fn rect(&self, id: WidgetId) -> Rect {
    let placement = self.tree.node(id).placement;
    let origin = self.tree.to_surface(id, Point::zero());
    Rect::new(origin.x(), origin.y(), placement.width(), placement.height())
  }

  /// Returns the canvas `id` draws into, with `id`'s colors applied.
  pub fn canvas(&mut self, id: WidgetId) -> &mut Canvas {
    let colors = self.tree.node(id).colors();
    let canvas = self.surface(self.tree.surface_of(id));
    canvas.apply(&colors);
    canvas
  }

  /// Returns the canvas for `surface`.
  pub fn surface(&mut self, surface: SurfaceId) -> &mut Canvas {
    match self.surfaces.get_mut(surface) {
      Some(canvas) => canvas,
      None => panic!("use of freed surface {:?}", surface),
    }
  }

  /// Copies the `src` region of one surface onto another at `at`.
  ///
  /// See [`Canvas::blit()`].
  pub fn blit(
    &mut self,
    from: SurfaceId,
    src: Rect,
    to: SurfaceId,
    at: Point,
    fg_alpha: f32,
    bg_alpha: f32,
  ) {
    match self.surfaces.get_disjoint_mut([from, to]) {
      Some([from, to]) => from.blit(src, to, at, fg_alpha, bg_alpha),
      None => log::warn!("cannot blit {:?} onto {:?}", from, to),
    }
  }
}

/// The frame rate limit of UI loops unless set otherwise.
pub const DEFAULT_FPS: u32 = 20;

/// The UI: the widget tree, its drawing surfaces, and its event queue.
pub struct Ui {
  tree: Tree,
  surfaces: SlotMap<SurfaceId, Canvas>,
  events: EventQueue,
  pub(in crate::ui) frontend: Box<dyn Frontend>,
  pub(in crate::ui) frame_timer: FrameTimer,
  pub(in crate::ui) timer: Rc<SystemTimer>,
  pub(in crate::ui) fps_limit: Option<u32>,
}

impl Ui {
  /// Creates an empty UI which presents to `frontend`.
  pub fn new(frontend: impl Frontend + 'static) -> Self {
    let (w, h) = frontend.size();
    let mut surfaces = SlotMap::with_key();
    let screen = surfaces.insert(Canvas::new(w, h));
    Self {
      tree: Tree {
        nodes: SlotMap::with_key(),
        screen,
      },
      surfaces,
      events: EventQueue::new(),
      frontend: Box::new(frontend),
      frame_timer: FrameTimer::new(),
      timer: Rc::new(SystemTimer::new()),
      fps_limit: Some(DEFAULT_FPS),
    }
  }

  /// Returns the widget tree.
  pub fn tree(&self) -> &Tree {
    &self.tree
  }

  /// Returns the event queue.
  pub fn events(&self) -> &EventQueue {
    &self.events
  }

  /// Posts an event; see [`EventQueue::post()`].
  pub fn post(
    &self,
    ty: EventType,
    payload: Payload,
    target: Option<WidgetId>,
  ) {
    self.events.post(ty, payload, target)
  }

  /// Sets the maximum frame rate of UI loops; `None` means no limit.
  pub fn set_fps_limit(&mut self, fps: Option<u32>) {
    self.fps_limit = fps;
  }

  /// Returns the screen canvas.
  pub fn screen(&self) -> &Canvas {
    self.canvas(self.tree.screen)
  }

  /// Returns the screen size as `(columns, rows)`.
  pub fn screen_size(&self) -> (i32, i32) {
    self.screen().dims().size()
  }

  pub(in crate::ui) fn screen_mut(&mut self) -> &mut Canvas {
    let screen = self.tree.screen;
    self.canvas_mut(screen)
  }

  /// Shows the screen canvas on the frontend.
  pub(in crate::ui) fn present(&mut self) -> io::Result<()> {
    let screen = &self.surfaces[self.tree.screen];
    self.frontend.present(screen)
  }

  /// Returns the canvas for `surface`.
  ///
  /// # Panics
  ///
  /// Panics if `surface` has been freed.
  pub fn canvas(&self, surface: SurfaceId) -> &Canvas {
    match self.surfaces.get(surface) {
      Some(canvas) => canvas,
      None => panic!("use of freed surface {:?}", surface),
    }
  }

  /// Returns the canvas for `surface`.
  ///
  /// # Panics
  ///
  /// Panics if `surface` has been freed.
  pub fn canvas_mut(&mut self, surface: SurfaceId) -> &mut Canvas {
    match self.surfaces.get_mut(surface) {
      Some(canvas) => canvas,
      None => panic!("use of freed surface {:?}", surface),
    }
  }

  /// Creates an offscreen surface and makes it the surface that `id`'s
  /// descendants draw into. The surface is freed along with `id`.
  pub fn provide_surface(
    &mut self,
    id: WidgetId,
    width: i32,
    height: i32,
  ) -> SurfaceId {
    let surface = self.surfaces.insert(Canvas::new(width, height));
    if let Some(old) = self.tree.node_mut(id).child_surface.replace(surface) {
      self.surfaces.remove(old);
    }
    surface
  }

  /// Returns the surface `id` draws into.
  pub fn surface_of(&self, id: WidgetId) -> SurfaceId {
    self.tree.surface_of(id)
  }

  /// Creates a widget, attached to `parent` if one is given.
  pub fn insert(
    &mut self,
    widget: impl Widget,
    parent: Option<WidgetId>,
    placement: Rect,
  ) -> WidgetId {
    let id = self.tree.nodes.insert(Node {
      parent: None,
      children: OrderedSet::new(),
      placement,
      bounds: Rect::default(),
      child_surface: None,
      handlers: HashMap::new(),
      hooks: Hooks::default(),
      colors: text::ACTIVE,
      blend: Blend::Set,
      enabled: true,
      widget: Box::new(widget),
    });
    log::trace!("created widget {:?} at {:?}", id, placement);
    if let Some(parent) = parent {
      self.attach(id, parent);
    }
    id
  }

  /// Returns the node for `id`.
  ///
  /// # Panics
  ///
  /// Panics if `id` has been destroyed.
  pub fn node(&self, id: WidgetId) -> &Node {
    self.tree.node(id)
  }

  /// Returns whether `id` refers to a live widget.
  pub fn contains(&self, id: WidgetId) -> bool {
    self.tree.contains(id)
  }

  /// Returns the widget-specific state of `id`, if it is a `W`.
  pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
    (*self.node(id).widget).as_any().downcast_ref()
  }

  /// Returns the widget-specific state of `id`, if it is a `W`.
  pub fn widget_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
    (*self.tree.node_mut(id).widget).as_any_mut().downcast_mut()
  }

  /// Returns the label displayed by `id`, if it has one.
  pub fn label_mut(&mut self, id: WidgetId) -> Option<&mut Label> {
    self.tree.node_mut(id).widget.label_mut()
  }

  /// Returns `id`'s parent.
  pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
    self.node(id).parent
  }

  /// Returns a snapshot of `id`'s children, in order.
  pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
    self.node(id).children.iter().collect()
  }

  /// Makes `child` the last child of `parent`, detaching it from its current
  /// parent first.
  ///
  /// # Panics
  ///
  /// Panics if `child` is `parent` or one of its ancestors.
  pub fn attach(&mut self, child: WidgetId, parent: WidgetId) {
    assert!(
      !self.tree.is_ancestor(child, parent),
      "attaching {:?} to {:?} would make a cycle",
      child,
      parent
    );
    if self.node(child).parent == Some(parent) {
      return;
    }
    self.detach(child);

    self.tree.node_mut(child).parent = Some(parent);
    let node = self.tree.node_mut(parent);
    node.children.add(child);
    let hook = node.hooks.attached;
    log::debug!("attached {:?} to {:?}", child, parent);
    if let Some(hook) = hook {
      hook(self, parent, child);
    }
  }

  /// Detaches `child` from its parent, making it a root. Does nothing if it
  /// has no parent.
  pub fn detach(&mut self, child: WidgetId) {
    let Some(parent) = self.tree.node_mut(child).parent.take() else {
      return;
    };
    let node = self.tree.node_mut(parent);
    node.children.remove(child);
    let hook = node.hooks.detached;
    log::debug!("detached {:?} from {:?}", child, parent);
    if let Some(hook) = hook {
      hook(self, parent, child);
    }
  }

  /// Destroys `id` and its whole subtree, along with any surfaces they
  /// provided.
  pub fn destroy(&mut self, id: WidgetId) {
    self.detach(id);

    let mut doomed = vec![id];
    while let Some(next) = doomed.pop() {
      let Some(node) = self.tree.nodes.remove(next) else {
        continue;
      };
      doomed.extend(node.children.iter());
      if let Some(surface) = node.child_surface {
        self.surfaces.remove(surface);
      }
    }
    log::debug!("destroyed {:?}", id);
  }

  /// Returns `id`'s placement.
  pub fn placement(&self, id: WidgetId) -> Rect {
    self.node(id).placement
  }

  /// Replaces `id`'s placement.
  pub fn set_placement(&mut self, id: WidgetId, placement: Rect) {
    self.tree.node_mut(id).placement = placement;
  }

  /// Moves `id`; `None` keeps the current value for that axis.
  pub fn move_to(&mut self, id: WidgetId, x: Option<i32>, y: Option<i32>) {
    self.tree.node_mut(id).placement.move_to(x, y);
  }

  /// Returns `id`'s sizing bounds.
  pub fn bounds(&self, id: WidgetId) -> Rect {
    self.node(id).bounds
  }

  /// Replaces `id`'s sizing bounds. Call [`Ui::refit()`] to apply them.
  pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) {
    self.tree.node_mut(id).bounds = bounds;
  }

  /// Sets the colors `id` draws with while enabled.
  pub fn set_colors(&mut self, id: WidgetId, colors: ColorSet) {
    self.tree.node_mut(id).colors = colors;
  }

  /// Sets how `id`'s drawing affects the background.
  pub fn set_blend(&mut self, id: WidgetId, blend: Blend) {
    self.tree.node_mut(id).blend = blend;
  }

  /// Enables or disables `id`.
  pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
    self.tree.node_mut(id).enabled = enabled;
  }

  /// Installs child hooks on `id`.
  pub fn set_hooks(&mut self, id: WidgetId, hooks: Hooks) {
    self.tree.node_mut(id).hooks = hooks;
  }

  /// Registers `handler` for events of type `ty` on `id`, replacing any
  /// previous handler for that type.
  pub fn on(
    &mut self,
    id: WidgetId,
    ty: EventType,
    handler: impl Fn(&mut Ui, WidgetId, &Event) -> bool + 'static,
  ) {
    self.tree.node_mut(id).handlers.insert(ty, Rc::new(handler));
  }

  /// Removes `id`'s handler for `ty`.
  pub fn off(&mut self, id: WidgetId, ty: EventType) {
    self.tree.node_mut(id).handlers.remove(&ty);
  }

  /// Translates `p` from `id`'s coordinates to screen coordinates.
  pub fn to_screen(&self, id: WidgetId, p: Point) -> Point {
    self.tree.to_screen(id, p)
  }

  /// Translates `p` from screen coordinates to `id`'s coordinates.
  pub fn to_local(&self, id: WidgetId, p: Point) -> Point {
    self.tree.to_local(id, p)
  }

  /// Translates `p` from `id`'s coordinates to the coordinates of the surface
  /// `id` draws into.
  pub fn to_surface(&self, id: WidgetId, p: Point) -> Point {
    self.tree.to_surface(id, p)
  }

  /// Centers `id` within its parent, or within the screen if it has no
  /// parent. Each axis is optional.
  pub fn center(&mut self, id: WidgetId, horizontal: bool, vertical: bool) {
    let (w, h) = match self.parent(id) {
      Some(parent) => self.placement(parent).size(),
      None => self.screen_size(),
    };
    let placement = &mut self.tree.node_mut(id).placement;
    if horizontal {
      let x = Integer::div_floor(&(w - placement.width()), &2);
      placement.move_to(Some(x), None);
    }
    if vertical {
      let y = Integer::div_floor(&(h - placement.height()), &2);
      placement.move_to(None, Some(y));
    }
  }

  fn measure(&self, id: WidgetId) -> Option<(i32, i32)> {
    let node = self.node(id);
    let canvas = self.canvas(self.surface_of(id));
    node.widget.measure(node.bounds, canvas)
  }

  /// Resizes `id` to its preferred size without telling anyone. Returns
  /// whether the size changed.
  pub fn fit(&mut self, id: WidgetId) -> bool {
    let Some((w, h)) = self.measure(id) else {
      return false;
    };
    let placement = &mut self.tree.node_mut(id).placement;
    if placement.size() == (w, h) {
      return false;
    }
    placement.resize(Some(w), Some(h));
    true
  }

  /// Resizes `id` to its preferred size. If the size changed, posts a
  /// [`EventType::Resize`] event addressed to `id` so that whatever contains
  /// it can react.
  pub fn refit(&mut self, id: WidgetId) -> bool {
    let changed = self.fit(id);
    if changed {
      log::trace!("{:?} resized to {:?}", id, self.placement(id).size());
      self.post(EventType::Resize, Payload::None, Some(id));
    }
    changed
  }

  /// Renders `id` and its subtree.
  pub fn render(&mut self, id: WidgetId) {
    let mut cx = RenderCx {
      tree: &self.tree,
      surfaces: &mut self.surfaces,
    };
    cx.render(id);
  }

  /// Routes `event` through the subtree rooted at `id`. Returns whether some
  /// widget accepted it.
  ///
  /// See the [module documentation](self) for the routing rules.
  pub fn dispatch(&mut self, id: WidgetId, event: &Event) -> bool {
    let Some(node) = self.tree.nodes.get(id) else {
      return false;
    };

    if let Some(handler) = node.handlers.get(&event.ty).cloned() {
      match event.target {
        None => {
          if handler(self, id, event) {
            log::trace!("{:?} accepted {:?}", id, event.ty);
            return true;
          }
        }
        Some(target) if target == id => {
          let handled = handler(self, id, event);
          log::trace!("{:?} handled targeted {:?}: {}", id, event.ty, handled);
          return handled;
        }
        Some(_) => {}
      }
    }

    // The handler may have rearranged the tree, so look again.
    let children = match self.tree.nodes.get(id) {
      Some(node) => node.children.iter().collect::<Vec<_>>(),
      None => return false,
    };
    for child in children {
      if self.contains(child) && self.dispatch(child, event) {
        return true;
      }
    }
    false
  }
}
