use std::io::BufRead;

use anyhow::Context;
use menu_admin::cli::{
    CategoryCommand, Cli, Command, ProductCommand, RestaurantCommand, UserCommand,
};
use menu_admin::{
    AdminApp, AdminConfig, CategoryEdit, ProductEdit, ReorderReport, RestaurantEdit, init_logger,
};
use shared::models::{MenuCategoryCreate, Orderable, ProductCreate, RestaurantCreate, UserCreate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse_with_env_file(None, std::env::args_os()).unwrap_or_else(|e| e.exit());
    let config = cli.apply_to(AdminConfig::from_env());
    let _log_guard = init_logger(config.log_dir.as_deref()).context("failed to set up logging")?;

    let mut app = AdminApp::open(config)?;
    run(&mut app, cli.command).await
}

async fn run(app: &mut AdminApp, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let session = app.login(&email, &password).await?;
            println!("Logged in as {} ({})", session.claims.name, session.claims.role);
        }
        Command::Logout => {
            app.logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let claims = &app.session()?.claims;
            println!("{} <{}>", claims.name, claims.email);
            println!("role: {}", claims.role);
            if let Some(restaurant) = &claims.restaurant_id {
                println!("restaurant: {}", restaurant);
            }
        }
        Command::ChangePassword {
            current,
            new,
            confirm,
        } => {
            let resp = app.change_password(&current, &new, &confirm).await?;
            println!("{}", resp.message.as_deref().unwrap_or("Password changed"));
        }
        Command::Restaurants(cmd) => restaurants(app, cmd).await?,
        Command::Categories(cmd) => categories(app, cmd).await?,
        Command::Products(cmd) => products(app, cmd).await?,
        Command::Upload { file } => {
            let url = app.upload_image(&file).await?;
            println!("{}", url);
        }
        Command::DeleteImage { url } => {
            app.delete_image(&url).await?;
            println!("Deleted");
        }
        Command::Qr {
            restaurant_id,
            out,
            size,
        } => {
            let path = app.write_qr(&restaurant_id, &out, size).await?;
            println!("{}", path.display());
        }
        Command::Users(UserCommand::List) => {
            for user in app.list_users().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    user.id,
                    user.username,
                    user.email,
                    user.role,
                    user.restaurant_name.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Users(UserCommand::Create {
            username,
            email,
            password,
            role,
            restaurant,
        }) => {
            let user = app
                .create_user(&UserCreate {
                    username,
                    email,
                    password,
                    role,
                    restaurant_id: restaurant,
                })
                .await?;
            println!("{}", user.id);
        }
        Command::Users(UserCommand::ResetPassword { id }) => {
            let resp = app.reset_password(&id).await?;
            println!("{}", resp.message.as_deref().unwrap_or("Password reset"));
        }
    }
    Ok(())
}

async fn restaurants(app: &AdminApp, cmd: RestaurantCommand) -> anyhow::Result<()> {
    match cmd {
        RestaurantCommand::List => {
            for r in app.list_restaurants().await? {
                let status = if r.is_deleted {
                    "deleted"
                } else if r.is_active {
                    "active"
                } else {
                    "inactive"
                };
                println!("{}\t{}\t{}", r.id, r.name, status);
            }
        }
        RestaurantCommand::Show { id } => {
            let menu = app.show_restaurant(&id).await?;
            println!("{} ({})", menu.restaurant.name, menu.restaurant.id);
            if let Some(logo) = &menu.restaurant.logo_url {
                println!("logo: {}", logo);
            }
            for category in &menu.menu_categories {
                println!("[{}] {}", category.category.display_order, category.category.name);
                for product in &category.products {
                    println!("    [{}] {}  {}", product.display_order, product.name, product.price);
                }
            }
        }
        RestaurantCommand::Create(args) => {
            let created = app
                .create_restaurant(&RestaurantCreate {
                    name: args.name,
                    description: args.description,
                    logo_url: args.logo_url,
                    phone: args.phone,
                    address: args.address,
                })
                .await?;
            println!("{}", created.id);
        }
        RestaurantCommand::Update(args) => {
            let updated = app
                .update_restaurant(
                    &args.id,
                    RestaurantEdit {
                        name: args.name,
                        description: args.description,
                        logo_url: args.logo_url,
                        phone: args.phone,
                        address: args.address,
                        is_active: args.active,
                    },
                )
                .await?;
            println!("Updated {}", updated.id);
        }
        RestaurantCommand::Delete { id, hard } => {
            app.delete_restaurant(&id, hard).await?;
            println!("Deleted {}", id);
        }
        RestaurantCommand::Restore { id } => {
            app.restore_restaurant(&id).await?;
            println!("Restored {}", id);
        }
    }
    Ok(())
}

async fn categories(app: &AdminApp, cmd: CategoryCommand) -> anyhow::Result<()> {
    match cmd {
        CategoryCommand::Create {
            restaurant,
            name,
            description,
            photo_url,
        } => {
            let created = app
                .create_category(
                    &restaurant,
                    &MenuCategoryCreate {
                        name,
                        description,
                        photo_url,
                        display_order: None,
                    },
                )
                .await?;
            println!("{}", created.id);
        }
        CategoryCommand::Update {
            id,
            name,
            description,
            photo_url,
            active,
        } => {
            let edit = CategoryEdit {
                name,
                description,
                photo_url,
                is_active: active,
            };
            let updated = app.update_category(&id, edit).await?;
            println!("Updated {}", updated.id);
        }
        CategoryCommand::Delete { id, hard } => {
            app.delete_category(&id, hard).await?;
            println!("Deleted {}", id);
        }
        CategoryCommand::Reorder { restaurant, id, to } => {
            let report = app.reorder_categories(&restaurant, &id, to).await?;
            print_report(&report, |c| c.name.as_str());
        }
    }
    Ok(())
}

async fn products(app: &AdminApp, cmd: ProductCommand) -> anyhow::Result<()> {
    match cmd {
        ProductCommand::Create {
            category,
            name,
            price,
            description,
            photo_url,
        } => {
            let created = app
                .create_product(
                    &category,
                    &ProductCreate {
                        name,
                        description,
                        price,
                        photo_url,
                        display_order: None,
                    },
                )
                .await?;
            println!("{}", created.id);
        }
        ProductCommand::Update {
            id,
            name,
            price,
            description,
            photo_url,
            available,
        } => {
            let edit = ProductEdit {
                name,
                description,
                price,
                photo_url,
                is_available: available,
            };
            let updated = app.update_product(&id, edit).await?;
            println!("Updated {}  {}", updated.id, updated.price);
        }
        ProductCommand::Delete { id, hard } => {
            app.delete_product(&id, hard).await?;
            println!("Deleted {}", id);
        }
        ProductCommand::Reorder { category, id, to } => {
            let report = app.reorder_products(&category, &id, to).await?;
            print_report(&report, |p| p.name.as_str());
        }
    }
    Ok(())
}

fn print_report<T: Orderable>(report: &ReorderReport<T>, name: impl Fn(&T) -> &str) {
    match report.outcome {
        Some(outcome) => println!("outcome: {:?}", outcome),
        None => println!("outcome: unchanged"),
    }
    for item in &report.items {
        println!("[{}] {}\t{}", item.display_order(), name(item), item.id());
    }
    for note in &report.notifications {
        eprintln!("{}", note);
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
