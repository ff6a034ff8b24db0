// Inventory menu integration tests
//
// Drives the public API the way a host does: an integrator builds a menu
// through its registry, the host opens it, then feeds click and close
// notifications back through the listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use inventory_menus::{
    ButtonActions, ClickEvent, ClickType, CloseEvent, Integrator, InventoryListener, InventoryView,
    ItemId, ItemStack, MenuConfig, MenuResult, RegistryDirectory, RenderSink, Viewer, ViewerId,
};

#[derive(Default)]
struct RecordingSink {
    shown: RefCell<Vec<(ViewerId, InventoryView)>>,
}

impl RenderSink for RecordingSink {
    fn show(&self, viewer: &Viewer, view: &InventoryView) -> MenuResult<()> {
        self.shown.borrow_mut().push((viewer.id(), view.clone()));
        Ok(())
    }
}

struct Plugin {
    name: String,
}

impl Integrator for Plugin {
    fn name(&self) -> &str {
        &self.name
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn click(viewer: &Rc<Viewer>, slot: usize) -> ClickEvent {
    ClickEvent::new(Rc::clone(viewer), slot, ClickType::Left)
}

#[test]
fn test_button_click_end_to_end() {
    init_logging();
    let sink = Rc::new(RecordingSink::default());
    let directory: RegistryDirectory<Plugin> = RegistryDirectory::new(sink.clone(), MenuConfig::default());
    let plugin = Rc::new(Plugin { name: "shops".into() });
    let registry = directory.registry_for(&plugin);

    let inventory = registry.create_inventory(3).unwrap();
    let counter = Rc::new(Cell::new(0));
    let hits = Rc::clone(&counter);
    inventory
        .create_button(4, ButtonActions::click(move |_, _| hits.set(hits.get() + 1)))
        .unwrap();

    let viewer_a = Rc::new(Viewer::new(ViewerId(1), "alex"));
    inventory.open(&viewer_a, Some("Shop")).unwrap();
    assert_eq!(sink.shown.borrow().len(), 1);
    assert_eq!(sink.shown.borrow()[0].1.size, 27);

    let mut event = click(&viewer_a, 4);
    directory.on_click(&mut event);
    assert!(event.is_cancelled());
    assert_eq!(counter.get(), 1);

    // no button and no default: swallowed, nothing runs
    let mut event = click(&viewer_a, 5);
    directory.on_click(&mut event);
    assert!(event.is_cancelled());
    assert_eq!(counter.get(), 1);

    directory.on_close(&CloseEvent::new(Rc::clone(&viewer_a)));
    assert!(!inventory.is_open(&viewer_a));

    let mut event = click(&viewer_a, 4);
    directory.on_click(&mut event);
    assert!(!event.is_cancelled());
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_click_then_event_order_and_default() {
    init_logging();
    let sink = Rc::new(RecordingSink::default());
    let directory: RegistryDirectory<Plugin> = RegistryDirectory::new(sink, MenuConfig::default());
    let plugin = Rc::new(Plugin { name: "menus".into() });
    let registry = directory.registry_for(&plugin);
    let inventory = registry.create_inventory(1).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let (on_click, on_event, on_default) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
    inventory
        .create_item_button(
            0,
            ItemStack::single(ItemId(5)).with_name("Buy"),
            ButtonActions::new()
                .on_click(move |button, viewer| {
                    on_click.borrow_mut().push(format!("click {} by {}", button.slot(), viewer.name()))
                })
                .on_event(move |event| on_event.borrow_mut().push(format!("event {:?}", event.click))),
        )
        .unwrap();
    inventory.create_default_button(ButtonActions::click(move |button, _| {
        on_default.borrow_mut().push(format!("default {}", button.slot()))
    }));

    let sam = Rc::new(Viewer::new(ViewerId(2), "sam"));
    inventory.open(&sam, None).unwrap();

    let mut event = click(&sam, 0);
    registry.on_click(&mut event);
    let mut event = click(&sam, 7);
    registry.on_click(&mut event);

    assert_eq!(
        *log.borrow(),
        vec!["click 0 by sam", "event Left", "default 7"]
    );
}

#[test]
fn test_submenu_switch_from_button() {
    init_logging();
    let sink = Rc::new(RecordingSink::default());
    let directory: RegistryDirectory<Plugin> = RegistryDirectory::new(sink.clone(), MenuConfig::default());
    let plugin = Rc::new(Plugin { name: "nav".into() });
    let registry = directory.registry_for(&plugin);

    let main = registry.create_inventory(1).unwrap();
    let settings = registry.create_inventory(2).unwrap();
    settings.fill_inventory(ItemStack::single(ItemId(160)));

    let target = Rc::downgrade(&settings);
    main.create_item_button(
        8,
        ItemStack::single(ItemId(2)).with_name("Settings"),
        ButtonActions::click(move |button, viewer| {
            if let (Some(from), Some(to)) = (button.inventory(), target.upgrade()) {
                from.close(viewer);
                to.open(viewer, Some("Settings")).unwrap();
            }
        }),
    )
    .unwrap();

    let alex = Rc::new(Viewer::new(ViewerId(1), "alex"));
    main.open(&alex, Some("Main")).unwrap();
    let mut event = click(&alex, 8);
    directory.on_click(&mut event);

    assert!(event.is_cancelled());
    assert!(!main.is_open(&alex));
    assert!(settings.is_open(&alex));
    let shown = sink.shown.borrow();
    let (_, last) = shown.last().unwrap();
    assert_eq!(last.title.as_deref(), Some("Settings"));
    assert_eq!(last.filled_slots(), 18);
}

#[test]
fn test_abandoned_menus_and_viewers_are_untracked() {
    init_logging();
    let sink = Rc::new(RecordingSink::default());
    let directory: RegistryDirectory<Plugin> = RegistryDirectory::new(sink, MenuConfig::default());
    let plugin = Rc::new(Plugin { name: "temp".into() });
    let registry = directory.registry_for(&plugin);

    let kept = registry.create_inventory(1).unwrap();
    let abandoned = registry.create_inventory(1).unwrap();
    let alex = Rc::new(Viewer::new(ViewerId(1), "alex"));
    let sam = Rc::new(Viewer::new(ViewerId(2), "sam"));
    kept.open(&alex, None).unwrap();
    kept.open(&sam, None).unwrap();
    abandoned.open(&alex, None).unwrap();

    drop(abandoned);
    drop(sam);
    assert_eq!(registry.len(), 1);
    assert_eq!(kept.viewers().len(), 1);

    alex.disconnect();
    directory.on_disconnect(&alex);
    assert!(kept.viewers().is_empty());
    assert!(kept.open(&alex, None).is_err());

    drop(registry);
    drop(plugin);
    assert!(directory.is_empty());
}
