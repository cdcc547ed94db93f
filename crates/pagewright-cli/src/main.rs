use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use kurbo::{Point, Size};
use pagewright_core::{
    Canvas, CanvasController, CanvasEvent, DragSession, EditorConfig, ElementContent, ElementId,
    FileStorage, Mediator, PageDocument, PageId, RemoveTarget, Storage, UiEvent, UiEventKind,
    handler,
};
use pollster::block_on;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "pagewright", about = "Edit Pagewright documents from the command line")]
struct Cli {
    /// Directory documents are stored in.
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Editor config file.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a document with one page.
    New {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// List stored documents.
    List,
    /// Print a document's pages and elements.
    Show { id: String },
    /// Append a page.
    AddPage { id: String },
    /// Add a text box to a page (1-based, defaults to the last page).
    AddText {
        id: String,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Resize a page and recenter it.
    PageSize {
        id: String,
        page: usize,
        width: f64,
        height: f64,
    },
    /// Drag an element by a delta, snapping to aligned centers.
    Move {
        id: String,
        element: ElementId,
        dx: f64,
        dy: f64,
    },
    /// Remove a page and restack the rest.
    RemovePage { id: String, page: usize },
}

/// A canvas wired to fresh event buses, as the editor panels would see it.
struct Session {
    bus: Rc<Mediator<CanvasEvent>>,
    controller: CanvasController,
}

impl Session {
    fn open(document: PageDocument, config: &EditorConfig) -> Self {
        let ui = Rc::new(Mediator::new());
        ui.subscribe(
            UiEventKind::ShowWarning,
            handler(|event: &UiEvent| {
                if let UiEvent::ShowWarning(message) = event {
                    log::warn!("{}", message);
                    eprintln!("warning: {message}");
                }
                Ok(())
            }),
        );
        ui.subscribe(
            UiEventKind::ShowHotTools,
            handler(|event: &UiEvent| {
                log::debug!("{:?}", event);
                Ok(())
            }),
        );

        let canvas = Canvas::with_document(document, config.clone(), ui);
        let bus = Rc::new(Mediator::new());
        let controller = CanvasController::attach(Rc::new(RefCell::new(canvas)), Rc::clone(&bus));
        Self { bus, controller }
    }

    fn publish(&self, event: CanvasEvent) -> Result<()> {
        self.bus.publish(&event)?;
        Ok(())
    }

    fn select_page(&self, page: PageId) -> Result<()> {
        self.controller.canvas().borrow_mut().click_page(page, None)?;
        Ok(())
    }

    fn close(self) -> PageDocument {
        let canvas = self.controller.detach();
        canvas.borrow().document.clone()
    }
}

/// Resolve a 1-based page number, or the last page.
fn page_at(document: &PageDocument, number: Option<usize>) -> Result<PageId> {
    let page = match number {
        Some(0) => bail!("pages are numbered from 1"),
        Some(n) => document.pages.get(n - 1),
        None => document.pages.last(),
    };
    page.map(|p| p.id)
        .ok_or_else(|| anyhow!("document has {} page(s)", document.len()))
}

fn show(id: &str, document: &PageDocument) {
    println!("{} ({}) - {} page(s)", id, document.name, document.len());
    for (index, page) in document.pages.iter().enumerate() {
        println!(
            "  page {} {} {}x{} at ({}, {})",
            index + 1,
            page.id,
            page.size.width,
            page.size.height,
            page.left,
            page.top
        );
        for element in &page.elements {
            let offset = element.offset();
            let size = element.size();
            println!(
                "    {} {} {}x{} at ({}, {})",
                element.kind().as_str(),
                element.id,
                size.width,
                size.height,
                offset.x,
                offset.y
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => EditorConfig::default_path()?,
    };
    let config = EditorConfig::load(&config_path)?;
    let storage = match cli.dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    let load = |id: &str| {
        block_on(storage.load(id)).with_context(|| format!("failed to load `{id}`"))
    };

    match cli.command {
        Command::New { id, name } => {
            if block_on(storage.exists(&id))? {
                bail!("document `{id}` already exists");
            }
            let mut document = PageDocument::new();
            if let Some(name) = name {
                document.name = name;
            }
            let session = Session::open(document, &config);
            session.publish(CanvasEvent::AddPage)?;
            block_on(storage.save(&id, &session.close()))?;
            println!("created {id}");
        }
        Command::List => {
            for id in block_on(storage.list())? {
                println!("{id}");
            }
        }
        Command::Show { id } => show(&id, &load(&id)?),
        Command::AddPage { id } => {
            let session = Session::open(load(&id)?, &config);
            session.publish(CanvasEvent::AddPage)?;
            let document = session.close();
            block_on(storage.save(&id, &document))?;
            println!("{id} now has {} page(s)", document.len());
        }
        Command::AddText { id, page, text } => {
            let document = load(&id)?;
            let page = page_at(&document, page)?;
            let content = match text {
                Some(text) => ElementContent::Text { text },
                None => ElementContent::placeholder_text(),
            };
            let session = Session::open(document, &config);
            session.select_page(page)?;
            session.publish(CanvasEvent::AddNewItem(content))?;
            let added = session.controller.canvas().borrow().active_element();
            block_on(storage.save(&id, &session.close()))?;
            if let Some(element) = added {
                println!("added {element}");
            }
        }
        Command::PageSize {
            id,
            page,
            width,
            height,
        } => {
            let document = load(&id)?;
            let page = page_at(&document, Some(page))?;
            let session = Session::open(document, &config);
            session.select_page(page)?;
            session.publish(CanvasEvent::ChangePageSize(Some(Size::new(width, height))))?;
            block_on(storage.save(&id, &session.close()))?;
        }
        Command::Move {
            id,
            element,
            dx,
            dy,
        } => {
            let mut document = load(&id)?;
            let mut drag = DragSession::begin(&document, element, Point::ZERO, config.snap_tolerance)?;
            let result = drag.update(&mut document, Point::new(dx, dy))?;
            drag.end();
            block_on(storage.save(&id, &document))?;

            println!("moved {element} to ({}, {})", result.offset.x, result.offset.y);
            if let Some(guide) = result.vertical {
                println!("  aligned vertically at x={}", guide.position);
            }
            if let Some(guide) = result.horizontal {
                println!("  aligned horizontally at y={}", guide.position);
            }
        }
        Command::RemovePage { id, page } => {
            let document = load(&id)?;
            let page = page_at(&document, Some(page))?;
            let session = Session::open(document, &config);
            session.publish(CanvasEvent::RemoveItem(RemoveTarget::Page(page)))?;
            block_on(storage.save(&id, &session.close()))?;
        }
    }

    Ok(())
}
